//! Registration of students, administrators and subjects.
//!
//! Usernames are shared between students and administrators: a name taken
//! in either table cannot be registered in the other.

use anyhow::{Result, bail};
use unimedia_core::{
  Library,
  account::{Administrator, Student, names_from_username},
  subject::{Specialty, Subject},
};

const STUDENT_PLACEHOLDER: &str = "Unknown";
const ADMIN_PLACEHOLDER: &str = "Admin";

/// Fields of `student add`.
pub struct NewStudent {
  pub username:    String,
  pub password:    String,
  pub family_name: Option<String>,
  pub given_name:  Option<String>,
  pub specialty:   String,
  pub subjects:    Vec<String>,
}

/// Fields of `admin add`.
pub struct NewAdministrator {
  pub username:    String,
  pub password:    String,
  pub family_name: Option<String>,
  pub given_name:  Option<String>,
  /// Defaults to the username.
  pub email:       Option<String>,
}

/// Add a student, creating their specialty and any unknown subject on the
/// way. Unknown subjects are named `"<code> - <specialty>"`.
pub fn register_student(library: &mut Library, new: NewStudent) -> Result<Student> {
  check_credentials(library, &new.username, &new.password)?;
  ensure_specialty(library, &new.specialty);

  let (family, given) = display_names(
    &new.username,
    new.family_name,
    new.given_name,
    STUDENT_PLACEHOLDER,
  );
  let mut student =
    Student::new(new.username, new.password, family, given, new.specialty.as_str());
  for code in new.subjects {
    if library.get_subject(&code).is_none() {
      library.add_subject(Subject::new(
        code.as_str(),
        format!("{code} - {}", new.specialty),
        Some(new.specialty.clone()),
      ));
    }
    library.link_subject(&new.specialty, &code);
    student.enroll(code);
  }

  tracing::info!(username = %student.username, specialty = %student.specialty, "student registered");
  library.add_student(student.clone());
  Ok(student)
}

pub fn register_administrator(
  library: &mut Library,
  new: NewAdministrator,
) -> Result<Administrator> {
  check_credentials(library, &new.username, &new.password)?;

  let (family, given) = display_names(
    &new.username,
    new.family_name,
    new.given_name,
    ADMIN_PLACEHOLDER,
  );
  let email = new.email.unwrap_or_else(|| new.username.clone());
  let admin = Administrator::new(new.username, new.password, family, given, email);

  tracing::info!(username = %admin.username, "administrator registered");
  library.add_administrator(admin.clone());
  Ok(admin)
}

/// Add a new subject and attach it to `specialty`, creating the specialty
/// if needed.
pub fn register_subject(
  library: &mut Library,
  code: &str,
  name: &str,
  specialty: &str,
) -> Result<()> {
  let code = code.trim();
  if code.is_empty() || name.trim().is_empty() {
    bail!("subject code and name must not be empty");
  }
  if library.get_subject(code).is_some() {
    bail!("subject {code:?} already exists");
  }

  ensure_specialty(library, specialty);
  library.add_subject(Subject::new(code, name.trim(), Some(specialty.to_owned())));
  library.link_subject(specialty, code);
  Ok(())
}

fn check_credentials(library: &Library, username: &str, password: &str) -> Result<()> {
  if username.trim().is_empty() || password.is_empty() {
    bail!("username and password must not be empty");
  }
  if library.username_taken(username) {
    bail!("username {username:?} already exists");
  }
  Ok(())
}

fn ensure_specialty(library: &mut Library, name: &str) {
  if library.get_specialty(name).is_none() {
    library.add_specialty(Specialty::new(name));
  }
}

/// Explicit names win; missing ones are derived from the username.
fn display_names(
  username: &str,
  family: Option<String>,
  given: Option<String>,
  placeholder: &str,
) -> (String, String) {
  let (derived_family, derived_given) = names_from_username(username, placeholder);
  (
    family.unwrap_or(derived_family),
    given.unwrap_or(derived_given),
  )
}
