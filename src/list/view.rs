use crate::data::student::Student;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Nama,
    Npm,
    Jurusan,
}

impl SortField {
    pub fn key(self, student: &Student) -> &str {
        match self {
            Self::Nama => &student.nama,
            Self::Npm => &student.npm,
            Self::Jurusan => &student.jurusan,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nama => "nama",
            Self::Npm => "npm",
            Self::Jurusan => "jurusan",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Serializes as the `sort`/`dir` pair the table headers send back.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    #[serde(rename = "sort")]
    pub field: SortField,
    #[serde(rename = "dir")]
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// The sort that results from clicking the `clicked` column header while
    /// `current` is active.
    pub fn toggle(current: Option<Self>, clicked: SortField) -> Self {
        match current {
            Some(Self {
                field,
                direction: SortDirection::Asc,
            }) if field == clicked => Self {
                field,
                direction: SortDirection::Desc,
            },
            _ => Self::ascending(clicked),
        }
    }

    fn compare(self, a: &Student, b: &Student) -> Ordering {
        let (a, b) = (self.field.key(a), self.field.key(b));
        match self.direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRow<'a> {
    /// 1-based position in the filtered and sorted output.
    pub number: usize,
    pub student: &'a Student,
}

/// `nama` and `jurusan` match case-insensitively, `npm` matches as typed.
pub fn matches(student: &Student, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let lowered = search.to_lowercase();
    student.nama.to_lowercase().contains(&lowered)
        || student.npm.contains(search)
        || student.jurusan.to_lowercase().contains(&lowered)
}

pub fn derive_view<'a>(
    students: &'a [Student],
    search: &str,
    sort: Option<SortSpec>,
) -> Vec<ViewRow<'a>> {
    let mut kept: Vec<&Student> = students.iter().filter(|s| matches(s, search)).collect();

    if let Some(spec) = sort {
        // `sort_by` is stable, ties keep their incoming order in both directions
        kept.sort_by(|a, b| spec.compare(a, b));
    }

    kept.into_iter()
        .enumerate()
        .map(|(i, student)| ViewRow {
            number: i + 1,
            student,
        })
        .collect()
}
