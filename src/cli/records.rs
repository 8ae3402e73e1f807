//! Course, project and note subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::{print_json, read_content, truncate_cell};
use crate::domain::{Course, Note, Project};
use crate::library::Library;

#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// Add a course
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        link: Option<String>,
    },

    /// List courses
    List,

    /// Show a course
    Show {
        id: i64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a course
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Add a project
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Image file name (stored under projects/)
        #[arg(long)]
        image: Option<String>,

        /// Live project URL
        #[arg(long)]
        link: Option<String>,

        /// Repository URL
        #[arg(long)]
        github: Option<String>,
    },

    /// List projects
    List,

    /// Show a project
    Show {
        id: i64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a project
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read note content from a file
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// PDF file name (stored under notes_pdfs/)
        #[arg(long)]
        pdf: Option<String>,
    },

    /// List notes
    List,

    /// Show a note
    Show {
        id: i64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete { id: i64 },
}

fn print_table_header() {
    println!("{:<6} {:<40} {:<40}", "ID", "TITLE", "LINK");
    println!("{}", "-".repeat(86));
}

pub fn execute_course(library: &Library, command: CourseCommands) -> Result<()> {
    match command {
        CourseCommands::Add {
            title,
            description,
            link,
        } => {
            let mut course = Course::new(title, description);
            course.link = link;
            let id = library.save_course(&mut course)?;
            println!("Created course {} \"{}\"", id, course.title);
        }
        CourseCommands::List => {
            let courses = library.list_courses()?;
            if courses.is_empty() {
                println!("No courses yet.");
                return Ok(());
            }
            print_table_header();
            for course in &courses {
                println!(
                    "{:<6} {:<40} {:<40}",
                    course.id.unwrap_or_default(),
                    truncate_cell(&course.title, 40),
                    course.link.as_deref().unwrap_or("-"),
                );
            }
        }
        CourseCommands::Show { id, json } => {
            let course = library.get_course(id)?;
            if json {
                return print_json(&course);
            }
            println!("{}", course.title);
            if let Some(link) = &course.link {
                println!("Link: {}", link);
            }
            println!();
            println!("{}", course.description);
        }
        CourseCommands::Delete { id } => {
            library.delete_course(id)?;
            println!("Deleted course {}", id);
        }
    }
    Ok(())
}

pub fn execute_project(library: &Library, command: ProjectCommands) -> Result<()> {
    match command {
        ProjectCommands::Add {
            title,
            description,
            image,
            link,
            github,
        } => {
            let mut project = Project::new(title, description);
            if let Some(image) = image {
                project = project.with_image(&image);
            }
            project.link = link;
            project.github_link = github;
            let id = library.save_project(&mut project)?;
            println!("Created project {} \"{}\"", id, project.title);
        }
        ProjectCommands::List => {
            let projects = library.list_projects()?;
            if projects.is_empty() {
                println!("No projects yet.");
                return Ok(());
            }
            print_table_header();
            for project in &projects {
                println!(
                    "{:<6} {:<40} {:<40}",
                    project.id.unwrap_or_default(),
                    truncate_cell(&project.title, 40),
                    project
                        .link
                        .as_deref()
                        .or(project.github_link.as_deref())
                        .unwrap_or("-"),
                );
            }
        }
        ProjectCommands::Show { id, json } => {
            let project = library.get_project(id)?;
            if json {
                return print_json(&project);
            }
            println!("{}", project.title);
            if let Some(link) = &project.link {
                println!("Link:   {}", link);
            }
            if let Some(github) = &project.github_link {
                println!("GitHub: {}", github);
            }
            if let Some(image) = &project.image {
                println!("Image:  {}", image);
            }
            println!();
            println!("{}", project.description);
        }
        ProjectCommands::Delete { id } => {
            library.delete_project(id)?;
            println!("Deleted project {}", id);
        }
    }
    Ok(())
}

pub fn execute_note(library: &Library, command: NoteCommands) -> Result<()> {
    match command {
        NoteCommands::Add {
            title,
            content,
            content_file,
            pdf,
        } => {
            let content = read_content(content, content_file)?
                .context("Note content is required (--content or --content-file)")?;
            let mut note = Note::new(title, content);
            if let Some(pdf) = pdf {
                note = note.with_pdf(&pdf);
            }
            let id = library.save_note(&mut note)?;
            println!("Created note {} \"{}\"", id, note.title);
        }
        NoteCommands::List => {
            let notes = library.list_notes()?;
            if notes.is_empty() {
                println!("No notes yet.");
                return Ok(());
            }
            println!("{:<6} {:<40} {:<20}", "ID", "TITLE", "CREATED");
            println!("{}", "-".repeat(66));
            for note in &notes {
                println!(
                    "{:<6} {:<40} {:<20}",
                    note.id.unwrap_or_default(),
                    truncate_cell(&note.title, 40),
                    note.created_at.format("%Y-%m-%d %H:%M").to_string(),
                );
            }
        }
        NoteCommands::Show { id, json } => {
            let note = library.get_note(id)?;
            if json {
                return print_json(&note);
            }
            println!("{}", note.title);
            println!("Created: {}", note.created_at.to_rfc3339());
            if let Some(path) = note.absolute_path() {
                println!("Path:    {}", path);
            }
            if let Some(pdf) = &note.pdf_file {
                println!("PDF:     {}", pdf);
            }
            println!();
            println!("{}", note.content);
        }
        NoteCommands::Delete { id } => {
            library.delete_note(id)?;
            println!("Deleted note {}", id);
        }
    }
    Ok(())
}
