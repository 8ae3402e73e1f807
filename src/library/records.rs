//! Course, project and note persistence.

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::{format_timestamp, timestamp_column, Library, LibraryError};
use crate::domain::{Course, Note, Project};

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        link: row.get(3)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        image: row.get(3)?,
        link: row.get(4)?,
        github_link: row.get(5)?,
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        content: row.get(2)?,
        pdf_file: row.get(3)?,
        created_at: timestamp_column(row, 4)?,
    })
}

impl Library {
    /// Insert or update a course
    pub fn save_course(&self, course: &mut Course) -> Result<i64, LibraryError> {
        let id = match course.id {
            Some(id) => {
                let changed = self.conn().execute(
                    "UPDATE courses SET title = ?1, description = ?2, link = ?3 WHERE id = ?4",
                    params![course.title, course.description, course.link, id],
                )?;
                if changed == 0 {
                    return Err(LibraryError::not_found("Course", id));
                }
                id
            }
            None => {
                self.conn().execute(
                    "INSERT INTO courses (title, description, link) VALUES (?1, ?2, ?3)",
                    params![course.title, course.description, course.link],
                )?;
                self.conn().last_insert_rowid()
            }
        };

        course.id = Some(id);
        info!(id, title = %course.title, "Saved course");
        Ok(id)
    }

    pub fn get_course(&self, id: i64) -> Result<Course, LibraryError> {
        self.conn()
            .query_row(
                "SELECT id, title, description, link FROM courses WHERE id = ?1",
                params![id],
                course_from_row,
            )
            .optional()?
            .ok_or_else(|| LibraryError::not_found("Course", id))
    }

    pub fn list_courses(&self) -> Result<Vec<Course>, LibraryError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, title, description, link FROM courses ORDER BY id")?;
        let courses = stmt
            .query_map([], course_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(courses)
    }

    pub fn delete_course(&self, id: i64) -> Result<(), LibraryError> {
        self.delete_row("courses", "Course", id)
    }

    /// Insert or update a project
    pub fn save_project(&self, project: &mut Project) -> Result<i64, LibraryError> {
        let id = match project.id {
            Some(id) => {
                let changed = self.conn().execute(
                    "UPDATE projects SET title = ?1, description = ?2, image = ?3, link = ?4,
                         github_link = ?5
                     WHERE id = ?6",
                    params![
                        project.title,
                        project.description,
                        project.image,
                        project.link,
                        project.github_link,
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Err(LibraryError::not_found("Project", id));
                }
                id
            }
            None => {
                self.conn().execute(
                    "INSERT INTO projects (title, description, image, link, github_link)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        project.title,
                        project.description,
                        project.image,
                        project.link,
                        project.github_link,
                    ],
                )?;
                self.conn().last_insert_rowid()
            }
        };

        project.id = Some(id);
        info!(id, title = %project.title, "Saved project");
        Ok(id)
    }

    pub fn get_project(&self, id: i64) -> Result<Project, LibraryError> {
        self.conn()
            .query_row(
                "SELECT id, title, description, image, link, github_link FROM projects
                 WHERE id = ?1",
                params![id],
                project_from_row,
            )
            .optional()?
            .ok_or_else(|| LibraryError::not_found("Project", id))
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, LibraryError> {
        let mut stmt = self.conn().prepare(
            "SELECT id, title, description, image, link, github_link FROM projects ORDER BY id",
        )?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    pub fn delete_project(&self, id: i64) -> Result<(), LibraryError> {
        self.delete_row("projects", "Project", id)
    }

    /// Insert or update a note. `created_at` is written on insert only.
    pub fn save_note(&self, note: &mut Note) -> Result<i64, LibraryError> {
        let id = match note.id {
            Some(id) => {
                let changed = self.conn().execute(
                    "UPDATE notes SET title = ?1, content = ?2, pdf_file = ?3 WHERE id = ?4",
                    params![note.title, note.content, note.pdf_file, id],
                )?;
                if changed == 0 {
                    return Err(LibraryError::not_found("Note", id));
                }
                id
            }
            None => {
                self.conn().execute(
                    "INSERT INTO notes (title, content, pdf_file, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        note.title,
                        note.content,
                        note.pdf_file,
                        format_timestamp(&note.created_at),
                    ],
                )?;
                self.conn().last_insert_rowid()
            }
        };

        note.id = Some(id);
        info!(id, title = %note.title, "Saved note");
        Ok(id)
    }

    pub fn get_note(&self, id: i64) -> Result<Note, LibraryError> {
        self.conn()
            .query_row(
                "SELECT id, title, content, pdf_file, created_at FROM notes WHERE id = ?1",
                params![id],
                note_from_row,
            )
            .optional()?
            .ok_or_else(|| LibraryError::not_found("Note", id))
    }

    pub fn list_notes(&self) -> Result<Vec<Note>, LibraryError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, title, content, pdf_file, created_at FROM notes ORDER BY id")?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    pub fn delete_note(&self, id: i64) -> Result<(), LibraryError> {
        self.delete_row("notes", "Note", id)
    }

    fn delete_row(&self, table: &str, kind: &'static str, id: i64) -> Result<(), LibraryError> {
        let deleted = self
            .conn()
            .execute(&format!("DELETE FROM {} WHERE id = ?1", table), params![id])?;
        if deleted == 0 {
            return Err(LibraryError::not_found(kind, id));
        }
        info!(id, table, "Deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_round_trip_and_update() {
        let library = Library::open_in_memory().unwrap();
        let mut course = Course::new("Rust", "Ownership").with_link("https://example.com/rust");

        let id = library.save_course(&mut course).unwrap();
        assert_eq!(course.id, Some(id));

        course.description = "Ownership and lifetimes".to_string();
        library.save_course(&mut course).unwrap();

        let loaded = library.get_course(id).unwrap();
        assert_eq!(loaded, course);
        assert_eq!(library.list_courses().unwrap().len(), 1);
    }

    #[test]
    fn test_note_keeps_created_at() {
        let library = Library::open_in_memory().unwrap();
        let mut note = Note::new("Lecture 1", "Intro").with_pdf("lecture-1.pdf");
        let id = library.save_note(&mut note).unwrap();

        let loaded = library.get_note(id).unwrap();
        assert_eq!(loaded.pdf_file.as_deref(), Some("notes_pdfs/lecture-1.pdf"));
        assert_eq!(
            loaded.created_at.timestamp_micros(),
            note.created_at.timestamp_micros()
        );
    }

    #[test]
    fn test_delete_missing_project() {
        let library = Library::open_in_memory().unwrap();
        assert!(matches!(
            library.delete_project(42),
            Err(LibraryError::NotFound { kind: "Project", .. })
        ));
    }

    #[test]
    fn test_update_of_unsaved_id_is_not_found() {
        let library = Library::open_in_memory().unwrap();
        let mut project = Project::new("Ghost", "Never inserted");
        project.id = Some(9);
        assert!(library.save_project(&mut project).is_err());
    }
}
