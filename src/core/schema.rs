//! Relational schema catalogue for the student information portal
//!
//! The catalogue is static data: ten tables, their columns and constraints,
//! composite unique keys, relationships and indexes. Diagrams and schema
//! documentation are generated from it.

use std::fmt::{self, Write as _};

/// Constraint attached to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Primary key
    PrimaryKey,
    /// Value generated by the database
    AutoIncrement,
    /// References `table.column`
    ForeignKey(&'static str, &'static str),
    /// Unique across the table
    Unique,
    /// May not be null
    NotNull,
    /// Explicitly nullable
    Nullable,
    /// Default value expression
    Default(&'static str),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey => f.write_str("PRIMARY KEY"),
            Self::AutoIncrement => f.write_str("AUTO_INCREMENT"),
            Self::ForeignKey(table, column) => write!(f, "FOREIGN KEY -> {table}.{column}"),
            Self::Unique => f.write_str("UNIQUE"),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Nullable => f.write_str("NULL"),
            Self::Default(value) => write!(f, "DEFAULT {value}"),
        }
    }
}

/// One column of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: &'static str,
    /// SQL type as documented
    pub sql_type: &'static str,
    /// Constraints in declaration order
    pub constraints: &'static [Constraint],
}

impl Column {
    /// Whether the column is the primary key
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.constraints.contains(&Constraint::PrimaryKey)
    }

    /// Foreign key target, if any
    #[must_use]
    pub fn foreign_key(&self) -> Option<(&'static str, &'static str)> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::ForeignKey(table, column) => Some((*table, *column)),
            _ => None,
        })
    }

    /// Whether the column is unique on its own
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.constraints.contains(&Constraint::Unique)
    }

    fn describe(&self) -> String {
        let constraints: Vec<String> = self.constraints.iter().map(ToString::to_string).collect();
        if constraints.is_empty() {
            self.sql_type.to_string()
        } else {
            format!("{}, {}", self.sql_type, constraints.join(", "))
        }
    }
}

/// A table of the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    /// Table name
    pub name: &'static str,
    /// Columns in declaration order
    pub columns: &'static [Column],
    /// Composite unique keys
    pub unique_keys: &'static [&'static [&'static str]],
}

impl Table {
    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key column
    #[must_use]
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_primary_key())
    }
}

/// Relationship cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// 1:1
    OneToOne,
    /// 1:N
    OneToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToOne => f.write_str("One-to-One"),
            Self::OneToMany => f.write_str("One-to-Many"),
        }
    }
}

/// A relationship between two tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    /// Parent (referenced) table
    pub from: &'static str,
    /// Child (referencing) table
    pub to: &'static str,
    /// Cardinality
    pub cardinality: Cardinality,
}

/// A documented index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    /// Indexed table
    pub table: &'static str,
    /// Indexed columns
    pub columns: &'static [&'static str],
    /// Composite rather than a set of single-column indexes
    pub composite: bool,
}

/// The whole catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Tables in documentation order
    pub tables: &'static [Table],
    /// Relationships in documentation order
    pub relationships: &'static [Relationship],
    /// Indexes in documentation order
    pub indexes: &'static [Index],
}

use Constraint::{AutoIncrement, ForeignKey, NotNull, Nullable, PrimaryKey, Unique};

const fn col(
    name: &'static str,
    sql_type: &'static str,
    constraints: &'static [Constraint],
) -> Column {
    Column {
        name,
        sql_type,
        constraints,
    }
}

const ID: &[Constraint] = &[PrimaryKey, AutoIncrement];
const CREATED_AT: Column = col("created_at", "TIMESTAMP", &[Constraint::Default("CURRENT_TIMESTAMP")]);

const TABLES: &[Table] = &[
    Table {
        name: "users",
        columns: &[
            col("user_id", "INT", ID),
            col("username", "VARCHAR(50)", &[Unique, NotNull]),
            col("email", "VARCHAR(100)", &[Unique, NotNull]),
            col("password_hash", "VARCHAR(255)", &[NotNull]),
            col("user_type", "ENUM('student', 'faculty', 'admin')", &[NotNull]),
            col("is_active", "BOOLEAN", &[Constraint::Default("TRUE")]),
            CREATED_AT,
            col("last_login", "TIMESTAMP", &[Nullable]),
        ],
        unique_keys: &[],
    },
    Table {
        name: "students",
        columns: &[
            col("student_id", "INT", ID),
            col("user_id", "INT", &[ForeignKey("users", "user_id"), Unique]),
            col("enrollment_number", "VARCHAR(20)", &[Unique, NotNull]),
            col("first_name", "VARCHAR(50)", &[NotNull]),
            col("last_name", "VARCHAR(50)", &[NotNull]),
            col("profile_photo", "VARCHAR(255)", &[Nullable]),
            col("date_of_birth", "DATE", &[NotNull]),
            col("gender", "ENUM('Male', 'Female', 'Other')", &[NotNull]),
            col("phone", "VARCHAR(15)", &[Nullable]),
            col("address", "TEXT", &[Nullable]),
            col("course_id", "INT", &[ForeignKey("courses", "course_id")]),
            col("semester", "INT", &[NotNull]),
            col("admission_date", "DATE", &[NotNull]),
            col(
                "status",
                "ENUM('Active', 'Inactive', 'Graduated')",
                &[Constraint::Default("'Active'")],
            ),
        ],
        unique_keys: &[],
    },
    Table {
        name: "courses",
        columns: &[
            col("course_id", "INT", ID),
            col("course_code", "VARCHAR(20)", &[Unique, NotNull]),
            col("course_name", "VARCHAR(100)", &[NotNull]),
            col("department", "VARCHAR(100)", &[NotNull]),
            col("duration_years", "INT", &[NotNull]),
            col("total_semesters", "INT", &[NotNull]),
            col("description", "TEXT", &[Nullable]),
        ],
        unique_keys: &[],
    },
    Table {
        name: "subjects",
        columns: &[
            col("subject_id", "INT", ID),
            col("subject_code", "VARCHAR(20)", &[Unique, NotNull]),
            col("subject_name", "VARCHAR(100)", &[NotNull]),
            col("course_id", "INT", &[ForeignKey("courses", "course_id")]),
            col("semester", "INT", &[NotNull]),
            col("credits", "INT", &[NotNull]),
            col("max_marks_internal", "INT", &[Constraint::Default("30")]),
            col("max_marks_external", "INT", &[Constraint::Default("70")]),
            col("description", "TEXT", &[Nullable]),
        ],
        unique_keys: &[],
    },
    Table {
        name: "attendance",
        columns: &[
            col("attendance_id", "INT", ID),
            col("student_id", "INT", &[ForeignKey("students", "student_id")]),
            col("subject_id", "INT", &[ForeignKey("subjects", "subject_id")]),
            col("attendance_date", "DATE", &[NotNull]),
            col("status", "ENUM('Present', 'Absent', 'Late')", &[NotNull]),
            col("marked_by", "INT", &[ForeignKey("users", "user_id")]),
            col("remarks", "TEXT", &[Nullable]),
            CREATED_AT,
        ],
        unique_keys: &[&["student_id", "subject_id", "attendance_date"]],
    },
    Table {
        name: "grades",
        columns: &[
            col("grade_id", "INT", ID),
            col("student_id", "INT", &[ForeignKey("students", "student_id")]),
            col("subject_id", "INT", &[ForeignKey("subjects", "subject_id")]),
            col("internal_marks", "DECIMAL(5,2)", &[Nullable]),
            col("external_marks", "DECIMAL(5,2)", &[Nullable]),
            col("total_marks", "DECIMAL(5,2)", &[Nullable]),
            col("grade", "VARCHAR(2)", &[Nullable]),
            col("grade_points", "DECIMAL(3,2)", &[Nullable]),
            col("semester", "INT", &[NotNull]),
            col("academic_year", "VARCHAR(10)", &[NotNull]),
            col("status", "ENUM('Pass', 'Fail', 'Pending')", &[Nullable]),
            CREATED_AT,
        ],
        unique_keys: &[&["student_id", "subject_id", "semester", "academic_year"]],
    },
    Table {
        name: "internships",
        columns: &[
            col("internship_id", "INT", ID),
            col("student_id", "INT", &[ForeignKey("students", "student_id")]),
            col("company_name", "VARCHAR(100)", &[NotNull]),
            col("position", "VARCHAR(100)", &[NotNull]),
            col("start_date", "DATE", &[NotNull]),
            col("end_date", "DATE", &[NotNull]),
            col("duration_months", "INT", &[NotNull]),
            col("description", "TEXT", &[Nullable]),
            col("credits_earned", "INT", &[Constraint::Default("0")]),
            col("certificate_path", "VARCHAR(255)", &[Nullable]),
            col(
                "status",
                "ENUM('Ongoing', 'Completed', 'Verified')",
                &[Constraint::Default("'Ongoing'")],
            ),
            col("verified_by", "INT", &[ForeignKey("users", "user_id"), Nullable]),
            CREATED_AT,
        ],
        unique_keys: &[],
    },
    Table {
        name: "fee_structure",
        columns: &[
            col("fee_structure_id", "INT", ID),
            col("course_id", "INT", &[ForeignKey("courses", "course_id")]),
            col("semester", "INT", &[NotNull]),
            col("tuition_fee", "DECIMAL(10,2)", &[NotNull]),
            col("library_fee", "DECIMAL(10,2)", &[Constraint::Default("0")]),
            col("lab_fee", "DECIMAL(10,2)", &[Constraint::Default("0")]),
            col("other_fee", "DECIMAL(10,2)", &[Constraint::Default("0")]),
            col("total_fee", "DECIMAL(10,2)", &[NotNull]),
            col("academic_year", "VARCHAR(10)", &[NotNull]),
        ],
        unique_keys: &[&["course_id", "semester", "academic_year"]],
    },
    Table {
        name: "fee_payments",
        columns: &[
            col("payment_id", "INT", ID),
            col("student_id", "INT", &[ForeignKey("students", "student_id")]),
            col(
                "fee_structure_id",
                "INT",
                &[ForeignKey("fee_structure", "fee_structure_id")],
            ),
            col("amount_paid", "DECIMAL(10,2)", &[NotNull]),
            col("payment_date", "DATE", &[NotNull]),
            col(
                "payment_method",
                "ENUM('Cash', 'Card', 'Online', 'Cheque')",
                &[NotNull],
            ),
            col("transaction_id", "VARCHAR(100)", &[Unique, Nullable]),
            col("receipt_number", "VARCHAR(50)", &[Unique, NotNull]),
            col(
                "status",
                "ENUM('Pending', 'Completed', 'Failed')",
                &[Constraint::Default("'Completed'")],
            ),
            CREATED_AT,
        ],
        unique_keys: &[],
    },
    Table {
        name: "admin_notifications",
        columns: &[
            col("notification_id", "INT", ID),
            col("title", "VARCHAR(200)", &[NotNull]),
            col("content", "TEXT", &[NotNull]),
            col("type", "ENUM('Circular', 'Announcement', 'Alert')", &[NotNull]),
            col(
                "target_audience",
                "ENUM('All', 'Students', 'Faculty')",
                &[Constraint::Default("'All'")],
            ),
            col("attachment_path", "VARCHAR(255)", &[Nullable]),
            col("created_by", "INT", &[ForeignKey("users", "user_id")]),
            CREATED_AT,
            col("is_active", "BOOLEAN", &[Constraint::Default("TRUE")]),
        ],
        unique_keys: &[],
    },
];

const fn rel(from: &'static str, to: &'static str, cardinality: Cardinality) -> Relationship {
    Relationship {
        from,
        to,
        cardinality,
    }
}

const RELATIONSHIPS: &[Relationship] = &[
    rel("users", "students", Cardinality::OneToOne),
    rel("courses", "students", Cardinality::OneToMany),
    rel("courses", "subjects", Cardinality::OneToMany),
    rel("students", "attendance", Cardinality::OneToMany),
    rel("subjects", "attendance", Cardinality::OneToMany),
    rel("students", "grades", Cardinality::OneToMany),
    rel("subjects", "grades", Cardinality::OneToMany),
    rel("students", "internships", Cardinality::OneToMany),
    rel("courses", "fee_structure", Cardinality::OneToMany),
    rel("students", "fee_payments", Cardinality::OneToMany),
    rel("fee_structure", "fee_payments", Cardinality::OneToMany),
];

const INDEXES: &[Index] = &[
    Index {
        table: "students",
        columns: &["enrollment_number"],
        composite: false,
    },
    Index {
        table: "attendance",
        columns: &["attendance_date"],
        composite: false,
    },
    Index {
        table: "grades",
        columns: &["student_id", "semester"],
        composite: false,
    },
    Index {
        table: "fee_payments",
        columns: &["student_id", "payment_date"],
        composite: false,
    },
    Index {
        table: "users",
        columns: &["email"],
        composite: false,
    },
    Index {
        table: "subjects",
        columns: &["subject_id", "semester"],
        composite: true,
    },
];

/// The portal's schema
pub const UNIHUB_SCHEMA: Schema = Schema {
    tables: TABLES,
    relationships: RELATIONSHIPS,
    indexes: INDEXES,
};

impl Schema {
    /// The portal's schema
    #[must_use]
    pub const fn unihub() -> &'static Self {
        &UNIHUB_SCHEMA
    }

    /// Look up a table by name
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Check that every foreign key and relationship names a known table and column
    ///
    /// # Errors
    /// Returns one message per unresolved reference
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        for table in self.tables {
            for column in table.columns {
                if let Some((target, target_col)) = column.foreign_key() {
                    let resolved = self
                        .table(target)
                        .is_some_and(|t| t.column(target_col).is_some());
                    if !resolved {
                        problems.push(format!(
                            "{}.{} references missing {target}.{target_col}",
                            table.name, column.name
                        ));
                    }
                }
            }
            for key in table.unique_keys {
                for name in *key {
                    if table.column(name).is_none() {
                        problems.push(format!("{}: unique key names missing column {name}", table.name));
                    }
                }
            }
        }
        for r in self.relationships {
            for name in [r.from, r.to] {
                if self.table(name).is_none() {
                    problems.push(format!("relationship names missing table {name}"));
                }
            }
        }
        for index in self.indexes {
            if self.table(index.table).is_none() {
                problems.push(format!("index names missing table {}", index.table));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    /// Plain-text schema documentation
    #[must_use]
    pub fn render_text(&self) -> String {
        let title = "DATABASE SCHEMA: UNIHUB STUDENT INFORMATION PORTAL";
        let mut out = format!("{title}\n{}\n\n", "=".repeat(title.len()));

        for (i, table) in self.tables.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} ({})",
                i + 1,
                table.name.to_uppercase(),
                table.name
            );
            for column in table.columns {
                let _ = writeln!(out, "   - {} ({})", column.name, column.describe());
            }
            for key in table.unique_keys {
                let _ = writeln!(out, "   - UNIQUE KEY ({})", key.join(", "));
            }
            out.push('\n');
        }

        out.push_str("RELATIONSHIPS\n=============\n");
        for (i, r) in self.relationships.iter().enumerate() {
            let _ = writeln!(out, "{}. {} -> {} ({})", i + 1, r.from, r.to, r.cardinality);
        }

        out.push_str("\nINDEXES\n=======\n");
        for index in self.indexes {
            let kind = if index.composite { "Composite index" } else { "Index" };
            let columns: Vec<String> = index
                .columns
                .iter()
                .map(|c| format!("{}.{c}", index.table))
                .collect();
            let _ = writeln!(out, "- {kind} on {}", columns.join(", "));
        }
        out
    }

    /// Markdown schema documentation with one table per entity
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("# UniHub Database Schema\n\n## Tables\n\n");

        for table in self.tables {
            let _ = writeln!(out, "### `{}`\n", table.name);
            out.push_str("| Column | Type | Constraints |\n|--------|------|-------------|\n");
            for column in table.columns {
                let constraints: Vec<String> =
                    column.constraints.iter().map(ToString::to_string).collect();
                let _ = writeln!(
                    out,
                    "| `{}` | {} | {} |",
                    column.name,
                    column.sql_type,
                    constraints.join(", ")
                );
            }
            for key in table.unique_keys {
                let _ = writeln!(out, "\nUnique key: ({})", key.join(", "));
            }
            out.push('\n');
        }

        out.push_str("## Relationships\n\n| From | To | Cardinality |\n|------|----|-------------|\n");
        for r in self.relationships {
            let _ = writeln!(out, "| `{}` | `{}` | {} |", r.from, r.to, r.cardinality);
        }

        out.push_str("\n## Indexes\n\n");
        for index in self.indexes {
            let kind = if index.composite { "composite" } else { "single" };
            let _ = writeln!(
                out,
                "- `{}`: {} ({kind})",
                index.table,
                index.columns.join(", ")
            );
        }
        out
    }
}
