//! Demo content for a fresh installation.

use unimedia_core::{
  Library,
  factory::{MediaFactoryRegistry, MediaHeader, Param},
  subject::{Specialty, Subject},
};

const SPECIALTIES: [&str; 3] = ["Informatique", "Mathematiques", "Physique"];

const SUBJECTS: [(&str, &str); 3] = [
  ("NFA032", "Programming Basics"),
  ("NFA035", "Advanced Programming"),
  ("NFP121", "Database Systems"),
];

struct Sample {
  kind:        &'static str,
  id:          &'static str,
  title:       &'static str,
  author:      &'static str,
  year:        i32,
  description: &'static str,
  params:      &'static [SampleParam],
}

enum SampleParam {
  Int(i64),
  Text(&'static str),
}

const MEDIA: [Sample; 5] = [
  Sample {
    kind:        "document",
    id:          "DOC001",
    title:       "Java Programming",
    author:      "John Doe",
    year:        2023,
    description: "Introduction to Java programming language",
    params:      &[SampleParam::Int(350)],
  },
  Sample {
    kind:        "video",
    id:          "VID001",
    title:       "Data Structures",
    author:      "Jane Smith",
    year:        2022,
    description: "Complete course on data structures",
    params:      &[SampleParam::Int(120)],
  },
  Sample {
    kind:        "quiz",
    id:          "QUIZ001",
    title:       "OOP Quiz",
    author:      "Dr. Brown",
    year:        2023,
    description: "Test your object-oriented programming knowledge",
    params:      &[SampleParam::Int(30), SampleParam::Text("Intermediate")],
  },
  Sample {
    kind:        "document",
    id:          "DOC002",
    title:       "Algorithms",
    author:      "Robert Johnson",
    year:        2021,
    description: "Introduction to algorithms and complexity",
    params:      &[SampleParam::Int(280)],
  },
  Sample {
    kind:        "video",
    id:          "VID002",
    title:       "Database Design",
    author:      "Maria Garcia",
    year:        2023,
    description: "Fundamentals of database design and SQL",
    params:      &[SampleParam::Int(90)],
  },
];

/// Register the demo specialties and Informatique subjects, then add the
/// sample media filed under every one of those subjects.
///
/// Returns the number of media added.
pub fn populate(
  library: &mut Library,
  factories: &MediaFactoryRegistry,
) -> unimedia_core::Result<usize> {
  for name in SPECIALTIES {
    if library.get_specialty(name).is_none() {
      library.add_specialty(Specialty::new(name));
    }
  }
  for (code, name) in SUBJECTS {
    if library.get_subject(code).is_none() {
      library.add_subject(Subject::new(code, name, Some("Informatique".into())));
    }
    library.link_subject("Informatique", code);
  }

  for sample in &MEDIA {
    let params: Vec<Param> = sample
      .params
      .iter()
      .map(|p| match p {
        SampleParam::Int(n) => Param::Int(*n),
        SampleParam::Text(s) => Param::Text((*s).to_owned()),
      })
      .collect();
    let mut media = factories.create(
      sample.kind,
      MediaHeader {
        id:               sample.id.to_owned(),
        title:            sample.title.to_owned(),
        author:           sample.author.to_owned(),
        publication_year: sample.year,
        description:      sample.description.to_owned(),
      },
      &params,
    )?;
    for (code, _) in SUBJECTS {
      media.add_subject(code);
    }
    library.add_media(media);
  }

  tracing::info!(media = MEDIA.len(), "demo data added");
  Ok(MEDIA.len())
}
