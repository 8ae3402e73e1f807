//! Blog post subcommands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{print_json, read_content, truncate_cell};
use crate::config;
use crate::domain::BlogPost;
use crate::library::{Library, PostQuery, POSTS_PER_PAGE};
use crate::resolver::ContentResolver;

/// Blog post subcommands
#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// Create a post
    Add(AddPostArgs),

    /// Change fields of an existing post
    Edit(EditPostArgs),

    /// List posts, newest first
    List {
        /// Search title, content, source URL and credit
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show a post with its content
    Show {
        slug: String,

        /// Print the post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a post
    Delete {
        slug: String,
    },

    /// Print every post's title and slug as JSON
    Slugs,

    /// List categories in use
    Categories,
}

#[derive(Args, Debug)]
pub struct AddPostArgs {
    #[arg(long)]
    pub title: String,

    /// URL slug (generated from the title if omitted)
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Source URL: a GitHub Gist, a YouTube video, or any public article
    #[arg(long)]
    pub src: Option<String>,

    /// Manually written content
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read manual content from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Credit or attribution for the source
    #[arg(long)]
    pub credit: Option<String>,

    /// Show fetched content before manual content
    #[arg(long)]
    pub fetched_first: bool,
}

#[derive(Args, Debug)]
pub struct EditPostArgs {
    /// Slug of the post to edit
    pub slug: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub new_slug: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// New source URL
    #[arg(long, conflicts_with = "clear_src")]
    pub src: Option<String>,

    /// Remove the source URL and its fetched content
    #[arg(long)]
    pub clear_src: bool,

    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    #[arg(long)]
    pub content_file: Option<PathBuf>,

    #[arg(long)]
    pub credit: Option<String>,

    /// Show fetched content before manual content
    #[arg(long)]
    pub fetched_first: Option<bool>,
}

/// Execute post subcommands
pub async fn execute(library: &Library, command: PostCommands) -> Result<()> {
    match command {
        PostCommands::Add(args) => add_post(library, args).await,
        PostCommands::Edit(args) => edit_post(library, args).await,
        PostCommands::List {
            search,
            category,
            page,
        } => list_posts(library, search, category, page),
        PostCommands::Show { slug, json } => show_post(library, &slug, json),
        PostCommands::Delete { slug } => {
            let post = library.get_post_by_slug(&slug)?;
            if let Some(id) = post.id {
                library.delete_post(id)?;
            }
            println!("Deleted \"{}\"", post.title);
            Ok(())
        }
        PostCommands::Slugs => {
            let slugs = library.list_slugs()?;
            println!("{}", serde_json::to_string_pretty(&slugs)?);
            Ok(())
        }
        PostCommands::Categories => {
            for category in library.post_categories()? {
                println!("{}", category);
            }
            Ok(())
        }
    }
}

fn resolver() -> Result<ContentResolver> {
    ContentResolver::from_settings(&config::config()?.fetch)
}

async fn add_post(library: &Library, args: AddPostArgs) -> Result<()> {
    let mut post = BlogPost::new(args.title).show_fetched_first(args.fetched_first);
    post.slug = args.slug.unwrap_or_default();
    post.category = args.category;
    post.credit = args.credit;
    post.content_manual = read_content(args.content, args.content_file)?;
    post.source.set_source_url(args.src);

    library.save_post(&mut post, &resolver()?).await?;

    println!("Created \"{}\" at {}", post.title, post.absolute_path());
    print_fetched_summary(&post);
    Ok(())
}

async fn edit_post(library: &Library, args: EditPostArgs) -> Result<()> {
    let mut post = library.get_post_by_slug(&args.slug)?;

    if let Some(title) = args.title {
        post.title = title;
    }
    if let Some(slug) = args.new_slug {
        post.slug = slug;
    }
    if let Some(category) = args.category {
        post.category = Some(category).filter(|c| !c.is_empty());
    }
    if args.clear_src {
        post.source.set_source_url(None);
    } else if let Some(src) = args.src {
        post.source.set_source_url(Some(src));
    }
    if let Some(content) = read_content(args.content, args.content_file)? {
        post.content_manual = Some(content);
    }
    if let Some(credit) = args.credit {
        post.credit = Some(credit).filter(|c| !c.is_empty());
    }
    if let Some(fetched_first) = args.fetched_first {
        post.show_fetched_first = fetched_first;
    }

    library.save_post(&mut post, &resolver()?).await?;

    println!("Updated \"{}\" at {}", post.title, post.absolute_path());
    print_fetched_summary(&post);
    Ok(())
}

fn print_fetched_summary(post: &BlogPost) {
    if let Some(src) = post.source_url() {
        println!("Source:  {}", src);
        println!("Fetched: {}", post.fetched_preview());
    }
}

fn list_posts(
    library: &Library,
    search: Option<String>,
    category: Option<String>,
    page: usize,
) -> Result<()> {
    let query = PostQuery {
        search,
        category,
        page,
    };

    let total = library.count_posts(&query)?;
    if total == 0 {
        println!("No posts found. Use 'folio post add' to create one.");
        return Ok(());
    }

    let posts = library.list_posts(&query)?;

    println!(
        "{:<30} {:<12} {:<12} {:<40}",
        "SLUG", "DATE", "CATEGORY", "FETCHED"
    );
    println!("{}", "-".repeat(96));

    for post in &posts {
        println!(
            "{:<30} {:<12} {:<12} {:<40}",
            truncate_cell(&post.slug, 30),
            post.pub_date.format("%Y-%m-%d").to_string(),
            truncate_cell(post.category.as_deref().unwrap_or("-"), 12),
            truncate_cell(&post.fetched_preview().replace('\n', " "), 40),
        );
    }

    let pages = total.div_ceil(POSTS_PER_PAGE);
    println!("\nPage {} of {} ({} posts)", page.max(1), pages, total);

    Ok(())
}

fn show_post(library: &Library, slug: &str, json: bool) -> Result<()> {
    let post = library.get_post_by_slug(slug)?;
    if json {
        return print_json(&post);
    }

    println!("{}", post.title);
    println!("{}", "=".repeat(post.title.chars().count()));
    println!("Slug:      {}", post.slug);
    println!("Published: {}", post.pub_date.to_rfc3339());
    if let Some(category) = &post.category {
        println!("Category:  {}", category);
    }
    if let Some(src) = post.source_url() {
        println!("Source:    {}", src);
    }
    if let Some(credit) = &post.credit {
        println!("Credit:    {}", credit);
    }

    for section in post.body() {
        println!();
        println!("{}", section);
    }

    Ok(())
}
