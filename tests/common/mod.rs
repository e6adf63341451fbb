#![allow(dead_code)]

use assert_fs::TempDir;
use rstest::fixture;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use twig::areas::repository::Repository;

pub const AUTHOR: &str = "tester";

/// Writer whose contents stay readable after the repository takes ownership of it
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct TestRepository {
    pub dir: TempDir,
    pub repository: Repository,
    pub output: OutputBuffer,
}

impl TestRepository {
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(path))
            .unwrap_or_else(|_| panic!("{path} was not written to the working tree"))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.dir.path().join(path).exists()
    }

    /// Stage every file, then commit
    pub fn commit_files(&mut self, message: &str, files: &[(&str, &str)]) -> String {
        for (path, content) in files {
            self.repository.add(path, content).expect("add failed");
        }

        self.repository
            .commit(message, AUTHOR)
            .expect("commit failed")
            .to_string()
    }
}

pub fn open_repository(path: &Path) -> (Repository, OutputBuffer) {
    colored::control::set_override(false);

    let output = OutputBuffer::default();
    let repository = Repository::new(&path.to_string_lossy(), Box::new(output.clone()))
        .expect("Failed to open repository");

    (repository, output)
}

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn repository(repository_dir: TempDir) -> TestRepository {
    let (repository, output) = open_repository(repository_dir.path());

    TestRepository {
        dir: repository_dir,
        repository,
        output,
    }
}

/// Repository with one commit on master holding `a.txt` = "x"
#[fixture]
pub fn committed_repository(mut repository: TestRepository) -> TestRepository {
    repository.commit_files("m1", &[("a.txt", "x")]);
    repository.output.clear();
    repository
}
