use std::io::{self, IsTerminal, Read, Write};
use std::thread;

use anyhow::Context;
use wordharvest_core::{build_pattern, render_word_list, CancelToken, Session, SessionRunner};
use wordharvest_engine::{write_word_list, WikipediaLanguageValidator, WikipediaPageSource};
use wordharvest_logging::{harvest_info, harvest_warn};

use crate::cli::Args;
use crate::config::FileConfig;
use crate::logging;
use crate::progress::ProgressBarObserver;

pub fn run(args: Args) -> anyhow::Result<()> {
    logging::initialize(args.log_level(), args.log_file.as_deref());

    let file_config = match args.config.as_deref() {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let plan = args.into_plan(file_config);

    if plan.print_pattern {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", build_pattern(&plan.extraction))?;
        return Ok(());
    }

    let session =
        Session::new(&plan.extraction, plan.settings.clone()).context("invalid word options")?;
    let piped_text = read_piped_stdin()?;

    let validator = WikipediaLanguageValidator::new(plan.fetch.clone(), plan.endpoint.clone())
        .context("starting the HTTP runtime")?;
    let mut source = WikipediaPageSource::new(plan.fetch, plan.endpoint)
        .context("starting the HTTP runtime")?;

    let cancel = CancelToken::new();
    cancel_on_interrupt(cancel.clone());

    let mut progress = ProgressBarObserver::new(plan.settings.target);
    logging::attach_progress_bar(progress.bar().clone());
    let outcome = SessionRunner::new(&session, &validator, &mut source)
        .with_observer(&mut progress)
        .with_cancel_token(cancel)
        .run(piped_text);
    progress.finish();
    logging::detach_progress_bar();
    let outcome = outcome?;

    let contents = render_word_list(&outcome.words);
    match plan.output_file {
        Some(path) => {
            write_word_list(&path, &contents)
                .with_context(|| format!("writing word list to {}", path.display()))?;
            harvest_info!("wrote {} words to {}", outcome.words.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Text piped into the process, if stdin is not a terminal.
fn read_piped_stdin() -> anyhow::Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("reading piped input")?;
    Ok(Some(text))
}

/// First Ctrl-C finishes after the current page; a second one exits at once.
fn cancel_on_interrupt(cancel: CancelToken) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                harvest_warn!("Ctrl-C handling unavailable: {}", err);
                return;
            }
        };
        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            harvest_warn!("interrupted; finishing after the current page");
            cancel.cancel();
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        });
    });
}
