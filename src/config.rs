//! Loads the project configuration from `postfilter.yaml`.

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "postfilter.yaml";

#[derive(Deserialize, Debug, PartialEq)]
struct PageSize(usize);
impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

fn default_title() -> String {
    String::from("Blog")
}

fn default_posts_directory() -> PathBuf {
    PathBuf::from("posts")
}

#[derive(Deserialize)]
struct Project {
    #[serde(default = "default_title")]
    title: String,

    #[serde(default = "default_posts_directory")]
    posts_directory: PathBuf,

    #[serde(default)]
    page_size: PageSize,

    #[serde(default)]
    template: Option<PathBuf>,
}

/// Resolved project configuration. Relative paths in the project file are
/// resolved against the directory holding it.
#[derive(Debug, PartialEq)]
pub struct Config {
    /// The index page title.
    pub title: String,

    /// The directory searched for post source files.
    pub posts_source_directory: PathBuf,

    /// The number of posts on the first page, and the default cap for
    /// events given without one.
    pub page_size: usize,

    /// The index page template; the built-in template is used when absent.
    pub template: Option<PathBuf>,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for [`PROJECT_FILE`]
    /// and loads the first one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path)
                .with_context(|| format!("Loading configuration from `{}`", path.display()))
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    /// Loads the project file at `path`.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .map_err(|e| anyhow!("Opening project file `{}`: {}", path.display(), e))?;
        let project: Project = serde_yaml::from_reader(file)?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;

        if project.page_size.0 == 0 {
            return Err(anyhow!("`page_size` must be at least 1"));
        }

        let config = Config {
            title: project.title,
            posts_source_directory: project_root.join(project.posts_directory),
            page_size: project.page_size.0,
            template: project.template.map(|t| project_root.join(t)),
        };
        debug!("loaded configuration: {:?}", config);
        Ok(config)
    }
}
