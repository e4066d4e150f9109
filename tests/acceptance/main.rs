use cucumber::World;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

#[derive(Debug, Default, World)]
pub struct ChincolWorld {
    pub workdir: Option<tempfile::TempDir>,
    pub repository: String,
    pub captured_output: Vec<u8>,
    pub captured_error: Vec<u8>,
    pub command_status: Option<ExitStatus>,
}

impl ChincolWorld {
    /// Directory the binary runs in; holds the CSV and config files.
    pub fn workdir(&self) -> &Path {
        self.workdir
            .as_ref()
            .expect("Background step must create the work directory")
            .path()
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.workdir().join("bin")
    }

    /// Files written by the fake gh.
    pub fn state_dir(&self) -> PathBuf {
        self.workdir().join("state")
    }
}

#[tokio::main]
async fn main() {
    ChincolWorld::cucumber().run_and_exit("features").await;
}

mod steps;
