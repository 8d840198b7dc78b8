use serde::{Deserialize, Serialize};

/// Number of digits in a valid NPM.
pub const NPM_LENGTH: usize = 8;

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i32,
    pub nama: String,
    pub jurusan: String,
    pub npm: String,
}

/// The three mutable fields, as sent when creating or replacing a student.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub nama: String,
    pub jurusan: String,
    pub npm: String,
}

impl Student {
    pub fn from_form(id: i32, form: StudentForm) -> Self {
        let StudentForm { nama, jurusan, npm } = form;
        Self {
            id,
            nama,
            jurusan,
            npm,
        }
    }

    pub fn to_form(&self) -> StudentForm {
        StudentForm {
            nama: self.nama.clone(),
            jurusan: self.jurusan.clone(),
            npm: self.npm.clone(),
        }
    }
}

/// `true` iff `npm` is exactly [`NPM_LENGTH`] ASCII digits.
pub fn is_valid_npm(npm: &str) -> bool {
    npm.len() == NPM_LENGTH && npm.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npm_must_be_eight_digits() {
        assert!(is_valid_npm("20240001"));
        assert!(!is_valid_npm("2024000"));
        assert!(!is_valid_npm("202400012"));
        assert!(!is_valid_npm("2024000a"));
        assert!(!is_valid_npm(""));
    }

    #[test]
    fn student_json_uses_plain_field_names() {
        let student = Student::from_form(
            7,
            StudentForm {
                nama: "Budi Santoso".into(),
                jurusan: "Teknik Informatika".into(),
                npm: "20240001".into(),
            },
        );
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "nama": "Budi Santoso",
                "jurusan": "Teknik Informatika",
                "npm": "20240001",
            })
        );
    }
}
