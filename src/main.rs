use std::io;
use std::time::{Duration, Instant};

use cipherstudio::app::{MountOptions, Workbench};
use cipherstudio::kernel::explorer::FileKind;
use cipherstudio::kernel::services::adapters::HeadlessSandbox;
use cipherstudio::kernel::NoticeLevel;

mod logging;

const REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

const USAGE: &str = "usage: cipherstudio [--backend URL] [--project ID] <show|save|load <id>|new>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Show,
    Save,
    Load(String),
    New,
}

#[derive(Debug)]
struct Cli {
    options: MountOptions,
    command: Command,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Cli, String> {
    let mut options = MountOptions::default();
    let mut command = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--backend" => {
                options.backend_url = Some(args.next().ok_or("--backend needs a URL")?);
            }
            "--project" => {
                options.project_id = Some(args.next().ok_or("--project needs an id")?);
            }
            "show" => command = Some(Command::Show),
            "save" => command = Some(Command::Save),
            "new" => command = Some(Command::New),
            "load" => {
                let id = args.next().ok_or("load needs a project id")?;
                command = Some(Command::Load(id));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(Cli {
        options,
        command: command.unwrap_or(Command::Show),
    })
}

fn print_project(workbench: &Workbench) {
    println!("project {}", workbench.project_id());
    for (path, content) in workbench.files() {
        let marker = if path == workbench.active_file() { "*" } else { " " };
        println!(
            "{marker} {path:<32} {:<6} {:>7} bytes",
            FileKind::of(path).as_str(),
            content.len()
        );
    }
}

fn wait_for_remote(workbench: &mut Workbench) {
    if !workbench.settle(REMOTE_TIMEOUT) {
        eprintln!("timed out waiting for {}", workbench.backend().base_url());
    }
}

fn main() -> io::Result<()> {
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return Err(io::Error::new(io::ErrorKind::InvalidInput, msg));
        }
    };

    let _logging = logging::init();

    let sandbox = HeadlessSandbox::new();
    let mut workbench = Workbench::open(
        cli.options.with_env(),
        Box::new(sandbox.clone()),
        Instant::now(),
    )?;

    match cli.command {
        Command::Show => print_project(&workbench),
        Command::Save => {
            workbench.save_project();
            wait_for_remote(&mut workbench);
        }
        Command::Load(id) => {
            workbench.load_project(&id);
            wait_for_remote(&mut workbench);
            if workbench.state().autosave.enabled() {
                workbench.flush_local();
            }
            print_project(&workbench);
        }
        Command::New => {
            workbench.new_project();
            print_project(&workbench);
        }
    }

    for notice in workbench.take_notices() {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.text),
            NoticeLevel::Error => eprintln!("{}", notice.text),
        }
    }

    tracing::debug!(reseeds = sandbox.reseed_count(), "session finished");
    workbench.shutdown();
    Ok(())
}
