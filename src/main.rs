use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use twig::areas::repository::Repository;
use twig::artifacts::merge::MergeOutcome;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A small in-memory version-control engine",
    long_about = "Content-addressed blobs, Merkle tree hashing, a commit DAG with branches \
    and three-way merging. History lives in memory for the lifetime of the process; \
    only checked-out files are written to disk.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "demo",
        about = "Run a scripted session against a fresh repository",
        long_about = "This command stages, commits, branches and merges a small project, \
        printing every step. The conflict scenario edits the same file on two branches; \
        the clean scenario edits different files."
    )]
    Demo {
        #[arg(short, long, value_enum, default_value_t = Scenario::Conflict)]
        scenario: Scenario,
        #[arg(short, long, help = "Working directory the checked-out files are written to")]
        path: Option<String>,
        #[arg(
            short,
            long,
            env = "GIT_AUTHOR_NAME",
            default_value = "twig",
            help = "Author recorded on the demo commits"
        )]
        author: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Both branches edit main.cpp
    Conflict,
    /// The branches edit disjoint files
    Clean,
}

const FEATURE_BRANCH: &str = "feature-login";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Demo {
            scenario,
            path,
            author,
        } => {
            let path = match path {
                Some(path) => path.clone(),
                None => std::env::current_dir()?.to_string_lossy().to_string(),
            };
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            run_demo(&mut repository, *scenario, author)?
        }
    }

    Ok(())
}

/// Every commit records exactly the staged set, so each step stages the whole project
fn stage(repository: &mut Repository, files: &[(&str, &str)]) -> Result<()> {
    for (path, content) in files {
        repository.add(path, content)?;
    }

    Ok(())
}

fn run_demo(repository: &mut Repository, scenario: Scenario, author: &str) -> Result<()> {
    const MAIN: &str = "int main() { return 0; }";
    const README: &str = "Version 1.0";

    stage(repository, &[("main.cpp", MAIN), ("readme.txt", README)])?;
    repository.commit("Initial commit", author)?;

    repository.create_branch(FEATURE_BRANCH)?;
    repository.checkout(FEATURE_BRANCH)?;
    match scenario {
        Scenario::Conflict => stage(
            repository,
            &[("main.cpp", "int main() { login(); return 0; }"), ("readme.txt", README)],
        )?,
        Scenario::Clean => stage(
            repository,
            &[("main.cpp", MAIN), ("readme.txt", README), ("login.cpp", "void login() {}")],
        )?,
    }
    repository.commit("Add login", author)?;

    repository.checkout("master")?;
    match scenario {
        Scenario::Conflict => stage(
            repository,
            &[("main.cpp", "int main() { return 1; }"), ("readme.txt", README)],
        )?,
        Scenario::Clean => stage(repository, &[("main.cpp", MAIN), ("readme.txt", "Version 1.1")])?,
    }
    repository.commit("Update on master", author)?;

    let outcome = repository.merge(FEATURE_BRANCH)?;
    if let MergeOutcome::Conflicted(conflicts) = &outcome {
        eprintln!(
            "{} conflicting file(s) left staged on {}",
            conflicts.len(),
            repository.current_branch_name()
        );
    }

    repository.log()?;

    Ok(())
}
