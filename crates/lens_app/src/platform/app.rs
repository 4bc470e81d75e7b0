use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use lens_core::{update, AppState, Msg, SelectedFile, Severity};
use lens_logging::{lens_debug, lens_info, lens_warn};

use super::config::LensConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::Command;

/// Everything the event loop reacts to: core messages from the terminal,
/// the client worker and timers, plus host-only commands.
pub(crate) enum Inbound {
    Msg(Msg),
    Help,
    Quit,
    Invalid(String),
}

pub struct RunOptions {
    pub preselect: Option<PathBuf>,
    pub once: bool,
}

/// Runs the terminal front-end. Returns false when a `--once` run ended in
/// a rejection, an error, or a transport failure.
pub fn run_app(config: LensConfig, options: RunOptions) -> anyhow::Result<bool> {
    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbound>();
    let effects =
        EffectRunner::new(&config, inbox_tx.clone()).context("failed to start the analysis client")?;
    let screen = if options.once {
        Screen::quiet()
    } else {
        Screen::default()
    };
    let mut host = Host::new(AppState::with_drop_zone(config.drop_zone), effects, screen);

    for field in &config.form_fields {
        host.dispatch(Msg::FormFieldChanged {
            name: field.name.clone(),
            value: field.value.clone(),
        });
    }
    if let Some(path) = options.preselect {
        host.dispatch(Msg::PickerChanged(vec![SelectedFile::from_path(path)]));
    }

    if options.once {
        drop(inbox_tx);
        return Ok(run_once(host, &inbox_rx));
    }

    spawn_stdin_reader(inbox_tx);
    host.redraw();
    println!("Type `help` for commands.");

    while let Ok(inbound) = inbox_rx.recv() {
        match inbound {
            Inbound::Msg(msg) => host.dispatch(msg),
            Inbound::Help => println!("{}", ui::input::HELP_TEXT),
            Inbound::Invalid(line) => println!("Unknown command: {line} (type `help`)"),
            Inbound::Quit => break,
        }
    }
    lens_info!("lens_app exiting");
    Ok(true)
}

fn run_once(mut host: Host, inbox: &mpsc::Receiver<Inbound>) -> bool {
    host.dispatch(Msg::SubmitClicked);
    while host.state.submission_state().is_in_flight() {
        match inbox.recv() {
            Ok(Inbound::Msg(msg)) => host.dispatch(msg),
            Ok(_) => {}
            Err(_) => {
                lens_warn!("client worker stopped before the submission settled");
                return false;
            }
        }
    }

    let view = host.state.view();
    if let Some(results) = &view.results {
        for (index, group) in results.groups.iter().enumerate() {
            if !group.expanded {
                host.dispatch(Msg::GroupToggled { index });
            }
        }
    }

    host.redraw();
    let view = host.state.view();
    !matches!(
        view.notification.map(|notification| notification.severity),
        Some(Severity::Warning | Severity::Danger)
    )
}

/// Decides which rendered frames reach stdout.
#[derive(Debug, Default)]
struct Screen {
    last_frame: Vec<String>,
    /// Only forced frames are printed; `--once` shows just the final one.
    quiet: bool,
}

impl Screen {
    fn quiet() -> Self {
        Self {
            last_frame: Vec::new(),
            quiet: true,
        }
    }

    /// Returns the frame to print after a state change, if any.
    fn offer(&mut self, frame: Vec<String>) -> Option<&[String]> {
        if self.quiet || frame == self.last_frame {
            return None;
        }
        self.last_frame = frame;
        Some(&self.last_frame)
    }

    fn force(&mut self, frame: Vec<String>) -> &[String] {
        self.last_frame = frame;
        &self.last_frame
    }
}

struct Host {
    state: AppState,
    effects: EffectRunner,
    screen: Screen,
}

impl Host {
    fn new(state: AppState, effects: EffectRunner, screen: Screen) -> Self {
        Self {
            state,
            effects,
            screen,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        lens_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);
        if was_dirty {
            let frame = ui::render::render(&self.state.view());
            if let Some(lines) = self.screen.offer(frame) {
                print_lines(lines);
            }
        }
    }

    fn redraw(&mut self) {
        let frame = ui::render::render(&self.state.view());
        print_lines(self.screen.force(frame));
    }
}

fn print_lines(lines: &[String]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out);
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}

fn spawn_stdin_reader(inbox: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let inbound = match ui::input::parse_line(&line) {
                Command::Messages(msgs) => {
                    for msg in msgs {
                        if inbox.send(Inbound::Msg(msg)).is_err() {
                            return;
                        }
                    }
                    continue;
                }
                Command::Empty => continue,
                Command::Help => Inbound::Help,
                Command::Quit => Inbound::Quit,
                Command::Unknown(line) => Inbound::Invalid(line),
            };
            if inbox.send(inbound).is_err() {
                return;
            }
        }
        let _ = inbox.send(Inbound::Quit);
    });
}

#[cfg(test)]
mod tests {
    use super::Screen;

    fn frame(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn interactive_screen_prints_each_distinct_frame_once() {
        let mut screen = Screen::default();
        assert!(screen.offer(frame("idle")).is_some());
        assert!(screen.offer(frame("idle")).is_none());
        assert_eq!(screen.offer(frame("in flight")), Some(&frame("in flight")[..]));
    }

    #[test]
    fn quiet_screen_prints_only_the_forced_final_frame() {
        let mut screen = Screen::quiet();
        for step in ["preselected", "in flight", "settled", "group 1 expanded"] {
            assert!(screen.offer(frame(step)).is_none(), "{step} was printed");
        }
        assert_eq!(screen.force(frame("final")), &frame("final")[..]);
    }
}
