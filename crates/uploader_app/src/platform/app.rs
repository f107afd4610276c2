use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use uploader_core::{update, Msg, WidgetState, WidgetViewModel};
use uploader_logging::{uploader_info, uploader_warn};

use super::config;
use super::effects::{EffectRunner, HostSurface};
use super::host::{parse_command, CommandError, HostCommand, TerminalHost};
use super::logging;
use super::ui;

#[derive(Debug)]
pub enum AppEvent {
    /// A parsed line from stdin.
    Command(HostCommand),
    /// A line that did not parse.
    Invalid(CommandError),
    /// A message produced off the UI loop, e.g. a settled prediction.
    Ui(Msg),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (app_config, config_problem) = match config::load_config(&cwd) {
        Ok(app_config) => (app_config, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    logging::initialize(app_config.log_destination, app_config.log_level);
    if let Some(err) = config_problem {
        uploader_warn!("Ignoring config: {}", err);
    }
    uploader_info!("Prediction endpoint: {}", app_config.predict.endpoint);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(app_config.predict, tx.clone())
        .context("failed to start prediction engine")?;
    let mut widget = Widget::new(effects);
    let mut host = TerminalHost::new(io::stdout());

    host.write_lines(&ui::render::help())?;
    host.render(&widget.view())?;
    spawn_input_reader(tx);

    while let Ok(event) = rx.recv() {
        let msgs = match event {
            AppEvent::Command(command) => host.translate(command),
            AppEvent::Invalid(err) => {
                host.report(&err.to_string());
                Vec::new()
            }
            AppEvent::Ui(msg) => vec![msg],
            AppEvent::Quit => break,
        };
        for msg in msgs {
            if let Some(view) = widget.dispatch(msg, &mut host) {
                host.render(&view)?;
            }
        }
    }

    uploader_info!("Uploader exiting");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_command(&line) {
                Ok(Some(HostCommand::Quit)) => break,
                Ok(Some(command)) => AppEvent::Command(command),
                Ok(None) => continue,
                Err(err) => AppEvent::Invalid(err),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}

/// Owns the widget state and runs the effects each message produces.
pub struct Widget {
    state: WidgetState,
    effects: EffectRunner,
}

impl Widget {
    pub fn new(effects: EffectRunner) -> Self {
        Self {
            state: WidgetState::new(),
            effects,
        }
    }

    pub fn view(&self) -> WidgetViewModel {
        self.state.view()
    }

    /// Applies `msg` and returns a view to render when anything changed.
    pub fn dispatch(&mut self, msg: Msg, surface: &mut dyn HostSurface) -> Option<WidgetViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;
        self.effects.run(effects, surface);
        view
    }

    #[cfg(test)]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }
}
