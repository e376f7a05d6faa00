use clap::{Args, Parser, Subcommand};
use minibadge_core::{Facet, Selection, SortSpec};
use std::path::PathBuf;

/// Minibadge catalog browser - search, filter and sort collectible badges
///
/// Examples:
///   # Show everything, newest first
///   minibadges browse minibadges.json
///
///   # Narrow by facets and search
///   minibadges browse minibadges.json --difficulty Advanced --search clock
///
///   # Sort by how many were made, most first
///   minibadges browse minibadges.json --sort quantityMade:num-desc
///
///   # Explore interactively
///   minibadges shell minibadges.json
///
///   # Build a catalog from form responses
///   minibadges import --csv-path responses.csv --output minibadges.json
#[derive(Parser, Debug)]
#[command(name = "minibadges")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Facet values must match exactly (case-sensitive)\n  \
    - Different facets are combined with AND\n  \
    - Search is a case-insensitive substring match over title, author, category,\n    \
      year, difficulty, description, board house, how to acquire and rarity\n  \
    - A facet offers the values that still produce results, plus its selection\n\n\
Sort Directives:\n  \
    - <field>:asc or <field>:desc for natural ordering (\"2\" before \"10\")\n  \
    - <field>:num-asc or <field>:num-desc to compare the first number in the value\n  \
    - Default: timestamp:desc")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter, sort and print the catalog once
    Browse(BrowseArgs),
    /// Read filter commands from stdin, one per line
    Shell(ShellArgs),
    /// Convert a form-response CSV export into a catalog JSON file
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog JSON files; a file that fails to load is skipped
    #[arg(
        value_name = "FILE",
        env = "MINIBADGE_JSON",
        default_value = "minibadges.json",
        value_delimiter = ','
    )]
    pub files: Vec<PathBuf>,

    /// One line per badge instead of cards
    #[arg(long)]
    pub rows: bool,

    /// Hide the facet option lists
    #[arg(long)]
    pub no_facets: bool,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Free-text search
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only this category
    #[arg(long, value_name = "VALUE")]
    pub category: Option<String>,

    /// Only this conference year
    #[arg(long, value_name = "VALUE")]
    pub year: Option<String>,

    /// Only this soldering difficulty
    #[arg(long, value_name = "VALUE")]
    pub difficulty: Option<String>,

    /// Only this author
    #[arg(long, value_name = "VALUE")]
    pub author: Option<String>,

    /// Sort directive, e.g. "title:asc" or "quantityMade:num-desc"
    #[arg(short = 'o', long = "sort", value_name = "DIRECTIVE")]
    pub sort: Option<SortSpec>,

    /// Print the resulting view as JSON
    #[arg(long)]
    pub json: bool,
}

impl BrowseArgs {
    /// The selection these flags describe
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::new();

        let facets = [
            (Facet::Category, &self.category),
            (Facet::Year, &self.year),
            (Facet::Difficulty, &self.difficulty),
            (Facet::Author, &self.author),
        ];
        for (facet, value) in facets {
            if let Some(value) = value {
                selection.set_facet(facet, value);
            }
        }

        if let Some(query) = &self.search {
            selection.set_query(query.clone());
        }
        if let Some(sort) = self.sort {
            selection.set_sort(sort);
        }

        selection
    }
}

#[derive(Args, Debug)]
pub struct ShellArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Form-response CSV export
    #[arg(
        long,
        value_name = "PATH",
        env = "MINIBADGE_CSV",
        default_value = "data/google-form-responses.csv"
    )]
    pub csv_path: PathBuf,

    /// Catalog JSON to write
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "MINIBADGE_JSON_OUT",
        default_value = "data/minibadges_from_form.json"
    )]
    pub output: PathBuf,
}
