//! CSV parser for UniHub records
//!
//! A records file starts with metadata lines (`Institution,<name>` and
//! `Academic Year,<label>`) followed by sections. A section is a title line,
//! a header row and data rows running until a blank line or the next title.
//! Cells are looked up by header name, so column order does not matter.

use super::RecordsError;
use crate::core::models::{
    AttendanceRecord, FeePayment, FeeStructure, GradeRecord, Internship, Notification, Programme,
    Student, Subject, University, UnknownVariant,
};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Sections recognised in a records file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Degree programmes
    Programmes,
    /// Subjects taught per programme and semester
    Subjects,
    /// Enrolled students
    Students,
    /// Attendance marks
    Attendance,
    /// Marks and grade points
    Grades,
    /// Internships
    Internships,
    /// Fee structures
    FeeStructure,
    /// Fee payments
    FeePayments,
    /// Administrative notices
    Notifications,
}

impl Section {
    /// Every section, in the order they usually appear
    pub const ALL: [Self; 9] = [
        Self::Programmes,
        Self::Subjects,
        Self::Students,
        Self::Attendance,
        Self::Grades,
        Self::Internships,
        Self::FeeStructure,
        Self::FeePayments,
        Self::Notifications,
    ];

    /// Title line that opens the section
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Programmes => "Programmes",
            Self::Subjects => "Subjects",
            Self::Students => "Students",
            Self::Attendance => "Attendance",
            Self::Grades => "Grades",
            Self::Internships => "Internships",
            Self::FeeStructure => "Fee Structure",
            Self::FeePayments => "Fee Payments",
            Self::Notifications => "Notifications",
        }
    }

    /// Match a title cell, case-insensitively
    #[must_use]
    pub fn from_title(cell: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.title().eq_ignore_ascii_case(cell.trim()))
    }
}

/// Parse a records CSV file into a [`University`]
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Errors
/// Returns a [`RecordsError`] if the file cannot be read, a required line or
/// section is missing, a cell fails to parse, a unique key repeats, or a
/// reference points at a record that does not exist
pub fn parse_records_csv<P: AsRef<Path>>(path: P) -> Result<University, RecordsError> {
    let path = path.as_ref();
    logger::debug!("Reading records from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_records_str(&content)
}

/// Parse records from CSV text
///
/// # Errors
/// Same as [`parse_records_csv`], minus I/O
pub fn parse_records_str(content: &str) -> Result<University, RecordsError> {
    let lines: Vec<&str> = content.lines().collect();

    let mut institution: Option<String> = None;
    let mut academic_year: Option<String> = None;
    let mut rows: Vec<(Section, usize, Vec<String>, Vec<String>)> = Vec::new();
    let mut seen_sections = Vec::new();

    let mut current: Option<(Section, Vec<String>)> = None;
    let mut idx = 0;
    while idx < lines.len() {
        let line_no = idx + 1;
        let cells = parse_csv_line(lines[idx]);
        idx += 1;

        if is_blank(&cells) {
            current = None;
            continue;
        }

        if let Some(section) = title_of(&cells) {
            let Some(header_line) = lines.get(idx).filter(|l| !l.trim().is_empty()) else {
                return Err(RecordsError::MissingHeader {
                    section: section.title(),
                    line: line_no,
                });
            };
            idx += 1;
            seen_sections.push(section);
            current = Some((section, parse_csv_line(header_line)));
            continue;
        }

        match &current {
            Some((section, headers)) => rows.push((*section, line_no, headers.clone(), cells)),
            None if seen_sections.is_empty() => match cells[0].to_lowercase().as_str() {
                "institution" => institution = cells.get(1).cloned(),
                "academic year" => academic_year = cells.get(1).cloned(),
                other => logger::debug!("Ignoring metadata line {line_no}: {other}"),
            },
            None => return Err(RecordsError::UnexpectedRow { line: line_no }),
        }
    }

    let institution = institution
        .filter(|s| !s.is_empty())
        .ok_or(RecordsError::MissingMetadata("Institution"))?;
    let academic_year = academic_year.unwrap_or_else(|| {
        logger::warn!("No 'Academic Year' line; current-year fee lookups will use the latest year");
        String::new()
    });
    if !seen_sections.contains(&Section::Students) {
        return Err(RecordsError::MissingSection(Section::Students.title()));
    }

    let mut university = University::new(institution, academic_year);

    // Sections load in dependency order regardless of their order in the file
    for section in Section::ALL {
        for (_, line, headers, cells) in rows.iter().filter(|r| r.0 == section) {
            let row = Row {
                section,
                line: *line,
                headers,
                cells,
            };
            load_row(&mut university, &row)?;
        }
    }

    university
        .validate_references()
        .map_err(RecordsError::DanglingReferences)?;

    logger::info!(
        "Loaded {} students and {} subjects for {}",
        university.students().len(),
        university.subjects().count(),
        university.name
    );
    Ok(university)
}

fn is_blank(cells: &[String]) -> bool {
    cells.iter().all(String::is_empty)
}

/// A title line has the section name in the first cell and nothing else
fn title_of(cells: &[String]) -> Option<Section> {
    if cells.iter().skip(1).any(|c| !c.is_empty()) {
        return None;
    }
    Section::from_title(&cells[0])
}

/// Split a CSV line into trimmed fields, honouring double quotes
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

/// One data row with header-based accessors
struct Row<'a> {
    section: Section,
    line: usize,
    headers: &'a [String],
    cells: &'a [String],
}

impl Row<'_> {
    /// Non-empty cell under `column`
    fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn text(&self, column: &'static str) -> Result<String, RecordsError> {
        self.get(column)
            .map(str::to_string)
            .ok_or(RecordsError::MissingColumn {
                section: self.section.title(),
                line: self.line,
                column,
            })
    }

    fn optional_text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }

    fn parse_number<T: FromStr>(&self, column: &'static str, raw: &str) -> Result<T, RecordsError> {
        raw.parse().map_err(|_| RecordsError::BadNumber {
            section: self.section.title(),
            line: self.line,
            column,
            value: raw.to_string(),
        })
    }

    fn number<T: FromStr>(&self, column: &'static str) -> Result<T, RecordsError> {
        let raw = self.text(column)?;
        self.parse_number(column, &raw)
    }

    fn optional_number<T: FromStr>(&self, column: &'static str) -> Result<Option<T>, RecordsError> {
        self.get(column)
            .map(|raw| self.parse_number(column, raw))
            .transpose()
    }

    fn date(&self, column: &'static str) -> Result<NaiveDate, RecordsError> {
        let raw = self.text(column)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| RecordsError::BadDate {
            section: self.section.title(),
            line: self.line,
            column,
            value: raw,
        })
    }

    /// Enum cell; an empty or absent cell parses as `""` so defaults apply
    fn variant<T>(&self, column: &str) -> Result<T, RecordsError>
    where
        T: FromStr<Err = UnknownVariant>,
    {
        self.get(column).unwrap_or_default().parse().map_err(|source| {
            RecordsError::UnknownValue {
                section: self.section.title(),
                line: self.line,
                source,
            }
        })
    }

    fn flag(&self, column: &str, default: bool) -> Result<bool, RecordsError> {
        let Some(raw) = self.get(column) else {
            return Ok(default);
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(true),
            "false" | "no" | "n" | "0" => Ok(false),
            _ => Err(RecordsError::UnknownValue {
                section: self.section.title(),
                line: self.line,
                source: UnknownVariant::new("boolean", raw),
            }),
        }
    }

    fn duplicate(&self, key: String) -> RecordsError {
        RecordsError::Duplicate {
            section: self.section.title(),
            line: self.line,
            key,
        }
    }
}

fn load_row(university: &mut University, row: &Row<'_>) -> Result<(), RecordsError> {
    match row.section {
        Section::Programmes => {
            let programme = Programme::new(
                row.number("ID")?,
                row.text("Code")?,
                row.text("Name")?,
                row.optional_text("Department"),
                row.optional_number("Duration Years")?.unwrap_or(4),
                row.optional_number("Total Semesters")?.unwrap_or(8),
            );
            let key = format!("{} ({})", programme.id, programme.code);
            if !university.add_programme(programme) {
                return Err(row.duplicate(key));
            }
        }
        Section::Subjects => {
            let mut subject = Subject::new(
                row.number("ID")?,
                row.text("Code")?,
                row.text("Name")?,
                row.number("Programme ID")?,
                row.number("Semester")?,
                row.number("Credits")?,
            );
            let max_internal = row.optional_number("Max Internal")?;
            let max_external = row.optional_number("Max External")?;
            if max_internal.is_some() || max_external.is_some() {
                let (default_internal, default_external) =
                    (subject.max_internal, subject.max_external);
                subject = subject.with_max_marks(
                    max_internal.unwrap_or(default_internal),
                    max_external.unwrap_or(default_external),
                );
            }
            let key = format!("{} ({})", subject.id, subject.code);
            if !university.add_subject(subject) {
                return Err(row.duplicate(key));
            }
        }
        Section::Students => {
            let mut student = Student::new(
                row.number("ID")?,
                row.text("Enrollment Number")?,
                row.text("First Name")?,
                row.text("Last Name")?,
                row.number("Programme ID")?,
                row.number("Semester")?,
            );
            student.email = row.get("Email").map(str::to_string);
            student.status = row.variant("Status")?;
            let key = format!("{} ({})", student.id, student.enrollment_number);
            if !university.add_student(student) {
                return Err(row.duplicate(key));
            }
        }
        Section::Attendance => {
            let record = AttendanceRecord::new(
                row.number("Student ID")?,
                row.number("Subject ID")?,
                row.date("Date")?,
                row.variant("Status")?,
            );
            let (student, subject, date) = record.key();
            if !university.add_attendance(record) {
                return Err(row.duplicate(format!("student {student}, subject {subject}, {date}")));
            }
        }
        Section::Grades => {
            let mut grade = GradeRecord::new(
                row.number("Student ID")?,
                row.number("Subject ID")?,
                row.number("Semester")?,
                row.get("Academic Year")
                    .map_or_else(|| university.academic_year.clone(), str::to_string),
            );
            grade.internal_marks = row.optional_number("Internal Marks")?;
            grade.external_marks = row.optional_number("External Marks")?;
            grade.grade_points = row.optional_number("Grade Points")?;
            let (student, subject, semester, year) = grade.key();
            if !university.add_grade(grade) {
                return Err(row.duplicate(format!(
                    "student {student}, subject {subject}, semester {semester}, {year}"
                )));
            }
        }
        Section::Internships => {
            university.add_internship(Internship {
                student_id: row.number("Student ID")?,
                company: row.text("Company")?,
                position: row.optional_text("Position"),
                start: row.date("Start Date")?,
                end: row.date("End Date")?,
                credits_earned: row.optional_number("Credits")?.unwrap_or(0),
                status: row.variant("Status")?,
            });
        }
        Section::FeeStructure => {
            let structure = FeeStructure {
                id: row.number("ID")?,
                programme_id: row.number("Programme ID")?,
                semester: row.number("Semester")?,
                academic_year: row
                    .get("Academic Year")
                    .map_or_else(|| university.academic_year.clone(), str::to_string),
                tuition: row.optional_number("Tuition")?.unwrap_or(0.0),
                library: row.optional_number("Library")?.unwrap_or(0.0),
                lab: row.optional_number("Lab")?.unwrap_or(0.0),
                other: row.optional_number("Other")?.unwrap_or(0.0),
            };
            let (programme, semester, year) = structure.key();
            let key = format!(
                "{} (programme {programme}, semester {semester}, {year})",
                structure.id
            );
            if !university.add_fee_structure(structure) {
                return Err(row.duplicate(key));
            }
        }
        Section::FeePayments => {
            let payment = FeePayment {
                student_id: row.number("Student ID")?,
                fee_structure_id: row.number("Fee Structure ID")?,
                amount: row.number("Amount")?,
                date: row.date("Date")?,
                method: row.variant("Method")?,
                receipt_number: row.text("Receipt Number")?,
                status: row.variant("Status")?,
            };
            let key = format!("receipt {}", payment.receipt_number);
            if !university.add_payment(payment) {
                return Err(row.duplicate(key));
            }
        }
        Section::Notifications => {
            university.add_notification(Notification {
                title: row.text("Title")?,
                content: row.optional_text("Content"),
                kind: row.variant("Type")?,
                audience: row.variant("Audience")?,
                created: row.date("Date")?,
                active: row.flag("Active", true)?,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "Institution,Test University\n\
        Academic Year,2024-25\n\
        \n\
        Programmes\n\
        ID,Code,Name\n\
        1,BTCS,B.Tech CS\n\
        \n\
        Students\n\
        ID,Enrollment Number,First Name,Last Name,Programme ID,Semester\n\
        1,EN001,Asha,Rao,1,3\n";

    #[test]
    fn test_parse_csv_line() {
        let fields = parse_csv_line("1, Mid-term ,\"Exams, hall 3\",\"say \"\"hi\"\"\",");
        assert_eq!(fields, vec!["1", "Mid-term", "Exams, hall 3", "say \"hi\"", ""]);
    }

    #[test]
    fn test_section_titles() {
        assert_eq!(Section::from_title("fee structure"), Some(Section::FeeStructure));
        assert_eq!(Section::from_title(" Fee Payments "), Some(Section::FeePayments));
        assert_eq!(Section::from_title("Hostels"), None);
        assert!(title_of(&parse_csv_line("Students,,,")).is_some());
        assert!(title_of(&parse_csv_line("Students,EN001")).is_none());
    }

    #[test]
    fn test_minimal_file() {
        let university = parse_records_str(MINIMAL).unwrap();
        assert_eq!(university.name, "Test University");
        assert_eq!(university.academic_year, "2024-25");
        let student = university.find_student("en001").unwrap();
        assert_eq!(student.full_name(), "Asha Rao");
        assert_eq!(university.get_programme(1).unwrap().total_semesters, 8);
    }

    #[test]
    fn test_subject_max_marks_fill_from_defaults() {
        let content = MINIMAL.replace(
            "Students\n",
            "Subjects\n\
             ID,Code,Name,Programme ID,Semester,Credits,Max Internal,Max External\n\
             1,CS301,Data Structures,1,3,4,40,\n\
             2,CS302,Databases,1,3,3,,\n\
             \n\
             Students\n",
        );
        let university = parse_records_str(&content).unwrap();
        let ds = university.get_subject(1).unwrap();
        assert!((ds.max_internal - 40.0).abs() < f64::EPSILON);
        assert!((ds.max_external - 70.0).abs() < f64::EPSILON);
        let db = university.get_subject(2).unwrap();
        assert!((db.max_total() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_institution() {
        let err = parse_records_str("Students\nID\n").unwrap_err();
        assert!(matches!(err, RecordsError::MissingMetadata("Institution")));
    }

    #[test]
    fn test_missing_students_section() {
        let err = parse_records_str("Institution,X\n\nProgrammes\nID,Code,Name\n1,A,B\n")
            .unwrap_err();
        assert!(matches!(err, RecordsError::MissingSection("Students")));
    }

    #[test]
    fn test_duplicate_reports_line() {
        let text = format!("{MINIMAL}2,EN001,Ravi,Kumar,1,3\n");
        match parse_records_str(&text).unwrap_err() {
            RecordsError::Duplicate { section, line, .. } => {
                assert_eq!(section, "Students");
                assert_eq!(line, 11);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_date_and_number() {
        let text = format!(
            "{MINIMAL}\nSubjects\nID,Code,Name,Programme ID,Semester,Credits\n1,CS1,OS,1,3,four\n"
        );
        assert!(matches!(
            parse_records_str(&text).unwrap_err(),
            RecordsError::BadNumber { column: "Credits", .. }
        ));

        let text = format!(
            "{MINIMAL}\nSubjects\nID,Code,Name,Programme ID,Semester,Credits\n1,CS1,OS,1,3,4\n\n\
             Attendance\nStudent ID,Subject ID,Date,Status\n1,1,03/01/2025,Present\n"
        );
        assert!(matches!(
            parse_records_str(&text).unwrap_err(),
            RecordsError::BadDate { .. }
        ));
    }

    #[test]
    fn test_dangling_reference() {
        let text = format!("{MINIMAL}3,EN003,Meera,Iyer,9,1\n");
        match parse_records_str(&text).unwrap_err() {
            RecordsError::DanglingReferences(refs) => {
                assert_eq!(refs.len(), 1);
                assert!(refs[0].contains("EN003"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_section_title_fails_as_row() {
        let text = format!("{MINIMAL}Hostels\n");
        assert!(parse_records_str(&text).is_err());
    }
}
