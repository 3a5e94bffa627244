#![allow(clippy::cast_precision_loss)]

use crate::model::{Student, StudentId};
use eyre::{Error, WrapErr, eyre};
use sqlx::any::{AnyConnectOptions, AnyRow};
use sqlx::{AnyConnection, Connection, Row};
use std::str::FromStr;
use tracing::trace;

const SELECT_STUDENTS: &str = "SELECT id, name, category, residence, gpa, semester FROM students";
const SELECT_STUDENT: &str =
    "SELECT id, name, category, residence, gpa, semester FROM students WHERE id = ?";

pub struct DatabaseLoader {
    conn: AnyConnection,
}

impl DatabaseLoader {
    pub async fn new(s: &str) -> Result<Self, Error> {
        sqlx::any::install_default_drivers();
        Ok(Self {
            conn: AnyConnection::connect_with(&AnyConnectOptions::from_str(s)?)
                .await
                .wrap_err("cannot connect to the students database")?,
        })
    }

    pub async fn load_students(&mut self) -> Result<Vec<Student>, Error> {
        let students = sqlx::query(SELECT_STUDENTS)
            .map(student_from_row)
            .fetch_all(&mut self.conn)
            .await
            .wrap_err("cannot load students")?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        trace!(students = students.len(), "roster loaded from database");
        Ok(students)
    }

    pub async fn load_student(&mut self, id: StudentId) -> Result<Option<Student>, Error> {
        sqlx::query(SELECT_STUDENT)
            .bind(i64::from(id.0))
            .map(student_from_row)
            .fetch_optional(&mut self.conn)
            .await
            .wrap_err_with(|| format!("cannot load student {}", id))?
            .transpose()
    }
}

/// Integer columns come back as 32 or 64 bits depending on the backend.
fn integer(row: &AnyRow, column: &str) -> Result<i64, sqlx::Error> {
    row.try_get::<i64, _>(column)
        .or_else(|_| row.try_get::<i32, _>(column).map(i64::from))
}

/// Numeric columns may be stored as double, single or integer values.
fn number(row: &AnyRow, column: &str) -> Result<f64, sqlx::Error> {
    row.try_get::<f64, _>(column)
        .or_else(|_| row.try_get::<f32, _>(column).map(f64::from))
        .or_else(|_| integer(row, column).map(|n| n as f64))
}

fn student_from_row(row: AnyRow) -> Result<Student, Error> {
    let id = integer(&row, "id").wrap_err("cannot read student id")?;
    let id = u32::try_from(id)
        .map(StudentId)
        .map_err(|_| eyre!("invalid student id {}", id))?;
    let field = |name: &str| format!("cannot read {} of student {}", name, id);
    let semester = integer(&row, "semester").wrap_err_with(|| field("semester"))?;
    Ok(Student::new(
        id,
        row.try_get::<String, _>("name")
            .wrap_err_with(|| field("name"))?,
        row.try_get::<String, _>("category")
            .wrap_err_with(|| field("category"))?
            .parse()
            .wrap_err_with(|| format!("invalid category for student {}", id))?,
        row.try_get::<String, _>("residence")
            .wrap_err_with(|| field("residence"))?
            .parse()
            .wrap_err_with(|| format!("invalid residence for student {}", id))?,
        number(&row, "gpa").wrap_err_with(|| field("gpa"))?,
        u32::try_from(semester).map_err(|_| eyre!("invalid semester {} for student {}", semester, id))?,
    ))
}
