//! Tree rendering commands — `lintree tree` and `lintree watch`.

use anyhow::Result;
use console::{Term, style};
use std::path::PathBuf;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, info, warn};

use lintree::tree::{FocusState, RefreshEvent, TreeProvider, spawn_pollers};
use lintree::ui::{RenderOptions, TreeView, render_tree};

use super::super::Cli;
use super::{build_provider, load_config, show_onboarding};

pub async fn cmd_tree(cli: &Cli, project_dir: PathBuf, depth: usize, links: bool) -> Result<()> {
    let config = load_config(cli, project_dir)?;
    show_onboarding(&config)?;
    let provider = build_provider(&config)?;

    let options = RenderOptions {
        depth,
        show_links: links,
    };
    print!("{}", render_tree(&provider, options).await);
    Ok(())
}

pub async fn cmd_watch(cli: &Cli, project_dir: PathBuf, depth: usize) -> Result<()> {
    let config = load_config(cli, project_dir)?;
    show_onboarding(&config)?;
    let provider = build_provider(&config)?;

    let options = RenderOptions {
        depth,
        show_links: false,
    };
    let term = Term::stdout();
    let mut events = provider.subscribe();
    let mut view = TreeView::new(options);

    // A terminal has no focus signal, so the pollers always run.
    let pollers = spawn_pollers(provider.clone(), FocusState::new(true), config.polling);
    info!("watching for branch and issue changes");
    redraw(&term, &mut view, &provider).await?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        debug!(?event, "refresh event");
                        view.apply(&event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "refresh events lagged");
                        view.apply(&RefreshEvent::All);
                    }
                    Err(RecvError::Closed) => break,
                }
                // Coalesce a burst of events into one redraw.
                loop {
                    match events.try_recv() {
                        Ok(event) => view.apply(&event),
                        Err(TryRecvError::Lagged(_)) => view.apply(&RefreshEvent::All),
                        Err(_) => break,
                    }
                }
                redraw(&term, &mut view, &provider).await?;
            }
        }
    }

    pollers.shutdown();
    Ok(())
}

async fn redraw(term: &Term, view: &mut TreeView, provider: &TreeProvider) -> Result<()> {
    let rendered = view.render(provider).await;
    term.clear_screen()?;
    term.write_str(&rendered)?;
    term.write_line(&format!(
        "\n{}",
        style("Watching for changes. Press Ctrl-C to exit.").dim()
    ))?;
    Ok(())
}
