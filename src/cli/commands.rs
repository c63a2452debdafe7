//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed
//! arguments and returns an `anyhow::Result<()>`. Network commands own a
//! tokio runtime and block on the async client.

use std::path::Path;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config;
use crate::discogs::{
    DiscogsClient, DiscogsConfig, ImageDownloads, MasterRelease, SearchType, SortKey,
};

/// Crate Digger CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog for a master release and print a summary
    Search {
        /// The search string
        query: String,
        /// Type of search to perform (only "master" is implemented)
        #[arg(short = 't', long = "type", default_value = "master")]
        search_type: SearchType,
        /// Discogs access token (or set DISCOGS_TOKEN env var)
        #[arg(long, env = "DISCOGS_TOKEN")]
        token: Option<String>,
        /// Download all cover images into the current directory
        #[arg(long)]
        save_images: bool,
    },
    /// Browse a user's collection folders
    Collection {
        /// Discogs username whose collection to browse
        #[arg(short, long)]
        username: String,
        /// Discogs access token (or set DISCOGS_TOKEN env var)
        #[arg(long, env = "DISCOGS_TOKEN")]
        token: Option<String>,
        /// List the collection folders
        #[arg(long)]
        folder_list: bool,
        /// List the items in this folder
        #[arg(long)]
        folder_id: Option<i64>,
        /// Sort order for folder items
        #[arg(long, default_value = "artist")]
        sort: SortKey,
    },
    /// Show or update the stored configuration
    Config {
        /// Store this token in the config file
        #[arg(long)]
        set_token: Option<String>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Search {
            query,
            search_type,
            token,
            save_images,
        } => cmd_search(query, *search_type, token.as_deref(), *save_images),
        Commands::Collection {
            username,
            token,
            folder_list,
            folder_id,
            sort,
        } => cmd_collection(username, token.as_deref(), *folder_list, *folder_id, *sort),
        Commands::Config { set_token } => cmd_config(set_token.as_deref()),
    }
}

// ============================================================================
// Individual command implementations
// ============================================================================

fn cmd_search(
    query: &str,
    search_type: SearchType,
    token: Option<&str>,
    save_images: bool,
) -> anyhow::Result<()> {
    if search_type != SearchType::Master {
        anyhow::bail!(
            "only --type master searches are implemented (got '{}')",
            search_type.as_str()
        );
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let client = build_client(token);

        let Some(hit) = client.search(query, None).await? else {
            println!("No master release found for \"{query}\".");
            return Ok(());
        };
        println!("{hit}");

        let master = client.fetch_master(hit.master_id, None).await?;
        print!("{master}");

        if save_images {
            match client.download_all_images(&master, None).await {
                Some(downloads) => {
                    let saved = save_downloads(Path::new("."), &master, &downloads)?;
                    println!("Saved {saved} image(s).");
                    if downloads.failed > 0 {
                        println!("{} image(s) failed to download.", downloads.failed);
                    }
                }
                None => println!("No images available for this release."),
            }
        }

        Ok(())
    })
}

fn cmd_collection(
    username: &str,
    token: Option<&str>,
    folder_list: bool,
    folder_id: Option<i64>,
    sort: SortKey,
) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let client = build_client(token);

        // Default to the folder list when no folder id is given
        if folder_list || folder_id.is_none() {
            match client.list_collection_folders(username, None).await? {
                Some(folders) => {
                    for folder in &folders {
                        println!("{:>8}  {} ({} item(s))", folder.id, folder.name, folder.count);
                    }
                }
                None => println!("{username} has no collection folders."),
            }
        }

        if let Some(folder_id) = folder_id {
            match client
                .list_folder_items(username, folder_id, sort, None)
                .await?
            {
                Some(items) => {
                    println!("Folder {folder_id} ({} item(s) on the first page):", items.len());
                    for item in &items {
                        let info = &item.basic_information;
                        let artist = info
                            .artists
                            .first()
                            .map(|a| a.name.as_str())
                            .unwrap_or("Unknown Artist");
                        println!("  {} - {} ({})", artist, info.title, info.year);
                    }
                }
                None => println!("Folder {folder_id} is empty."),
            }
        }

        Ok(())
    })
}

fn cmd_config(set_token: Option<&str>) -> anyhow::Result<()> {
    let path = config::config_path()
        .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

    if let Some(token) = set_token {
        let mut config = config::load();
        config.credentials.discogs_token = Some(token.to_string());
        config::save(&config)?;
        println!("Token saved to {}", path.display());
    } else {
        let config = config::load();
        println!("Config file: {}", path.display());
        match config.credentials.discogs_token {
            Some(_) => println!("Discogs token: set"),
            None => println!("Discogs token: not set"),
        }
    }

    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

/// Build a client whose default token comes from the CLI flag/env var or,
/// failing that, the config file.
fn build_client(token: Option<&str>) -> DiscogsClient {
    let config = config::load();
    let token = token
        .map(String::from)
        .or(config.credentials.discogs_token);
    DiscogsClient::new(DiscogsConfig { token })
}

/// Write downloaded images into `dir`.
///
/// Files are named from the release title, the image kind, and the image's
/// position on the release, so the same release always produces the same
/// names. Each file is written only from a fully downloaded buffer.
fn save_downloads(
    dir: &Path,
    master: &MasterRelease,
    downloads: &ImageDownloads,
) -> anyhow::Result<usize> {
    let stem = sanitize_filename(master.title.as_deref().unwrap_or("master"));
    let mut saved = 0;

    for (counter, image) in master.images.iter().enumerate() {
        let Some(bytes) = downloads.images.get(image) else {
            continue;
        };
        let filename = format!("{}-{}-{}.jpg", stem, image.kind.as_str(), counter + 1);
        std::fs::write(dir.join(&filename), bytes)?;
        println!("Wrote {filename} ({}x{})", image.width, image.height);
        saved += 1;
    }

    Ok(saved)
}

/// Replace path separators and other awkward characters in a release title.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "master".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discogs::{Image, ImageKind};

    fn saved_image(kind: ImageKind, uri: &str) -> Image {
        Image {
            width: 600,
            height: 600,
            kind,
            resource_url: None,
            uri: Some(uri.to_string()),
            uri150: None,
        }
    }

    #[test]
    fn test_saved_image_names_follow_release_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let front = saved_image(ImageKind::Primary, "https://img.example/front.jpg");
        let back = saved_image(ImageKind::Secondary, "https://img.example/back.jpg");
        let master = MasterRelease {
            title: Some("Jalamanta".to_string()),
            images: vec![front.clone(), back.clone()],
            ..Default::default()
        };

        let mut downloads = ImageDownloads::default();
        downloads.images.insert(back.clone(), b"back".to_vec());
        downloads.images.insert(front.clone(), b"front".to_vec());

        let saved = save_downloads(dir.path(), &master, &downloads).expect("writes succeed");

        assert_eq!(saved, 2);
        let front_path = dir.path().join("Jalamanta-primary-1.jpg");
        let back_path = dir.path().join("Jalamanta-secondary-2.jpg");
        assert_eq!(std::fs::read(front_path).unwrap(), b"front");
        assert_eq!(std::fs::read(back_path).unwrap(), b"back");
    }

    #[test]
    fn test_saved_image_names_keep_position_after_failures() {
        // The first image failed to download; the second keeps its slot
        let dir = tempfile::tempdir().expect("temp dir");
        let front = saved_image(ImageKind::Primary, "https://img.example/front.jpg");
        let back = saved_image(ImageKind::Secondary, "https://img.example/back.jpg");
        let master = MasterRelease {
            title: Some("Jalamanta".to_string()),
            images: vec![front, back.clone()],
            ..Default::default()
        };

        let mut downloads = ImageDownloads::default();
        downloads.images.insert(back, b"back".to_vec());
        downloads.failed = 1;

        let saved = save_downloads(dir.path(), &master, &downloads).expect("writes succeed");

        assert_eq!(saved, 1);
        assert!(!dir.path().join("Jalamanta-primary-1.jpg").exists());
        assert!(dir.path().join("Jalamanta-secondary-2.jpg").exists());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Jalamanta"), "Jalamanta");
        assert_eq!(sanitize_filename("AC/DC: Live"), "AC_DC_ Live");
        assert_eq!(sanitize_filename("What?"), "What_");
        assert_eq!(sanitize_filename("  "), "master");
        assert_eq!(sanitize_filename(""), "master");
    }

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from(["crate-digger", "search", "Jalamanta", "--save-images"])
            .expect("should parse");
        match cli.command {
            Commands::Search {
                query,
                search_type,
                save_images,
                ..
            } => {
                assert_eq!(query, "Jalamanta");
                assert_eq!(search_type, SearchType::Master);
                assert!(save_images);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_cli_parses_collection_sort() {
        let cli = Cli::try_parse_from([
            "crate-digger",
            "collection",
            "--username",
            "brant",
            "--folder-id",
            "1",
            "--sort",
            "year",
        ])
        .expect("should parse");
        match cli.command {
            Commands::Collection {
                username,
                folder_id,
                sort,
                ..
            } => {
                assert_eq!(username, "brant");
                assert_eq!(folder_id, Some(1));
                assert_eq!(sort, SortKey::Year);
            }
            _ => panic!("expected collection command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_sort() {
        let result = Cli::try_parse_from([
            "crate-digger",
            "collection",
            "--username",
            "brant",
            "--sort",
            "random",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_master_search_is_rejected() {
        let err = cmd_search("Jalamanta", SearchType::Artist, Some("tkn"), false).unwrap_err();
        assert!(err.to_string().contains("master"));
    }
}
