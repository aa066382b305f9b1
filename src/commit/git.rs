use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{ArtError, ArtResult},
    schedule::generator::Schedule,
    source::SourceDescriptor,
};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PROGRESS_EVERY: usize = 25;

/// Local author identity written into the repository config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug)]
pub struct CommitConfig {
    pub repo_dir: PathBuf,
    pub branch: String,
    /// When unset, a globally configured git identity is required.
    pub author: Option<Author>,
}

impl CommitConfig {
    pub fn validate(&self) -> ArtResult<()> {
        if self.branch.trim().is_empty() {
            return Err(ArtError::validation("branch name must be non-empty"));
        }
        if let Some(author) = &self.author {
            if author.name.trim().is_empty() || author.email.trim().is_empty() {
                return Err(ArtError::validation(
                    "author name and email must be non-empty",
                ));
            }
        }
        Ok(())
    }
}

pub fn is_git_on_path() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Replays a [`Schedule`] as backdated commits in a local repository using the system `git`.
pub struct CommitWriter {
    cfg: CommitConfig,
}

impl CommitWriter {
    pub fn new(cfg: CommitConfig) -> ArtResult<Self> {
        cfg.validate()?;

        if !is_git_on_path() {
            return Err(ArtError::input(
                "git is required to create commits, but was not found on PATH",
            ));
        }

        std::fs::create_dir_all(&cfg.repo_dir).with_context(|| {
            format!("create repository dir '{}'", cfg.repo_dir.display())
        })?;
        let occupied = std::fs::read_dir(&cfg.repo_dir)
            .with_context(|| format!("read repository dir '{}'", cfg.repo_dir.display()))?
            .next()
            .is_some();
        if occupied {
            return Err(ArtError::validation(format!(
                "repository dir '{}' must be empty",
                cfg.repo_dir.display()
            )));
        }

        Ok(Self { cfg })
    }

    pub fn repo_dir(&self) -> &Path {
        &self.cfg.repo_dir
    }

    /// Initialize the repository and create one commit per event, in schedule order.
    ///
    /// Returns the number of commits created.
    #[tracing::instrument(skip(self, schedule), fields(repo = %self.cfg.repo_dir.display(), events = schedule.len()))]
    pub fn write(&self, schedule: &Schedule, source: &SourceDescriptor) -> ArtResult<usize> {
        if schedule.is_empty() {
            return Err(ArtError::empty_result("schedule has no events to commit"));
        }

        self.git(&["init", "--quiet"])?;
        let head = format!("refs/heads/{}", self.cfg.branch);
        self.git(&["symbolic-ref", "HEAD", &head])?;
        match &self.cfg.author {
            Some(author) => {
                self.git(&["config", "user.name", &author.name])?;
                self.git(&["config", "user.email", &author.email])?;
            }
            None => self.require_identity()?,
        }

        let total = schedule.len();
        let readme = self.cfg.repo_dir.join("README.md");
        std::fs::write(&readme, readme_body(source, total))
            .with_context(|| format!("write '{}'", readme.display()))?;

        for (i, event) in schedule.events.iter().enumerate() {
            let stamp = event.at.format(DATE_FORMAT).to_string();

            // Each commit needs a distinct tree change.
            let mut f = std::fs::OpenOptions::new()
                .append(true)
                .open(&readme)
                .with_context(|| format!("open '{}'", readme.display()))?;
            write!(f, "\n<!-- Commit {} at {stamp} -->", i + 1)
                .with_context(|| format!("append to '{}'", readme.display()))?;
            drop(f);

            self.git(&["add", "README.md"])?;
            self.git_dated(
                &["commit", "--quiet", "-m", &format!("Art pixel {}/{total}", i + 1)],
                &stamp,
            )?;

            if (i + 1) % PROGRESS_EVERY == 0 || i + 1 == total {
                tracing::info!(
                    done = i + 1,
                    total,
                    percent = %format!("{:.1}", (i + 1) as f64 / total as f64 * 100.0),
                    "creating commits"
                );
            }
        }

        Ok(total)
    }

    fn require_identity(&self) -> ArtResult<()> {
        for key in ["user.name", "user.email"] {
            if self.git(&["config", key]).is_err() {
                return Err(ArtError::input(format!(
                    "git {key} is not configured; run `git config --global {key} <value>` \
                     or pass an author explicitly"
                )));
            }
        }
        Ok(())
    }

    fn git(&self, args: &[&str]) -> ArtResult<String> {
        self.run(args, None)
    }

    fn git_dated(&self, args: &[&str], date: &str) -> ArtResult<String> {
        self.run(args, Some(date))
    }

    fn run(&self, args: &[&str], date: Option<&str>) -> ArtResult<String> {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.cfg.repo_dir)
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .stdin(Stdio::null());
        if let Some(date) = date {
            cmd.env("GIT_AUTHOR_DATE", date)
                .env("GIT_COMMITTER_DATE", date);
        }

        let output = cmd.output().map_err(|e| {
            ArtError::input(format!(
                "failed to spawn git (is it installed and on PATH?): {e}"
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArtError::Other(anyhow::anyhow!(
                "git {} exited with status {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn readme_body(source: &SourceDescriptor, total: usize) -> String {
    format!(
        "# Contribution Graph Art\n\n{}\nGenerated: {}\n\n\
         Each commit represents one pixel of the picture on the contribution graph.\n\n\
         Total commits: {total}\n",
        source.describe(),
        chrono::Local::now().format(DATE_FORMAT),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/commit/git.rs"]
mod tests;
