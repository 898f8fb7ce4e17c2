use std::{
    cell::RefCell,
    env,
    error::Error,
    io::{self, BufRead},
    rc::Rc,
    sync::mpsc::{self, Sender},
};

use icade_reader::{ButtonId, ButtonSet, ICadeDelegate, ICadeReader, InputHost, ReaderConfig};
use log::{info, warn, LevelFilter};
use serde::Serialize;

const DEFAULT_CONFIG_PATH: &str = "reader.yml";

#[derive(Debug, Clone, Copy)]
enum ControlMessage {
    Down(ButtonId),
    Up(ButtonId),
    State(ButtonSet),
}

/// Forwards decoded events into the main loop.
struct ChannelDelegate {
    tx: Sender<ControlMessage>,
}

impl ICadeDelegate for ChannelDelegate {
    fn button_down(&mut self, button: ButtonId) {
        let _ = self.tx.send(ControlMessage::Down(button));
    }

    fn button_up(&mut self, button: ButtonId) {
        let _ = self.tx.send(ControlMessage::Up(button));
    }

    fn state_changed(&mut self, state: ButtonSet) {
        let _ = self.tx.send(ControlMessage::State(state));
    }
}

/// Stdin has no focus or buffer to manage; just track it for the log.
#[derive(Default)]
struct TerminalHost {
    foreground: bool,
    focused: bool,
}

impl InputHost for TerminalHost {
    fn is_foreground(&self) -> bool {
        self.foreground
    }

    fn request_focus(&mut self) {
        self.focused = true;
        info!("input focus taken");
    }

    fn release_focus(&mut self) {
        self.focused = false;
        info!("input focus released");
    }

    fn clear_input_buffer(&mut self) {}
}

#[derive(Serialize)]
struct Snapshot {
    bits: u16,
    held: Vec<ButtonId>,
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()?;

    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match ReaderConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{config_path}: {err}, using defaults");
            ReaderConfig::default()
        }
    };

    let host_locale = env::var("LANG").ok();
    let host = TerminalHost {
        foreground: true,
        ..TerminalHost::default()
    };
    let mut reader = ICadeReader::with_config(&config, host_locale.as_deref(), host);
    info!(
        "using {:?} layout, keys {}",
        reader.table().locale,
        reader.table().key_inputs().collect::<String>()
    );

    let (tx, rx) = mpsc::channel::<ControlMessage>();
    let delegate = Rc::new(RefCell::new(ChannelDelegate { tx }));
    reader.set_delegate(&delegate);
    reader.set_active(true);

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            ":quit" => break,
            ":bg" => {
                reader.will_resign_active();
                reader.host_mut().foreground = false;
            }
            ":fg" => {
                reader.host_mut().foreground = true;
                reader.did_become_active();
            }
            ":on" => reader.set_active(true),
            ":off" => reader.set_active(false),
            ":state" => {
                let state = reader.state();
                let snapshot = Snapshot {
                    bits: state.bits(),
                    held: state.pressed().collect(),
                };
                print!("{}", serde_yaml::to_string(&snapshot)?);
            }
            _ if !reader.is_active() || !reader.host().focused => {
                warn!("reader has no input focus, dropping {line:?}");
            }
            keys => {
                reader.handle_input(keys);
            }
        }

        // Drain controller events.
        while let Ok(message) = rx.try_recv() {
            match message {
                ControlMessage::Down(button) => println!("DOWN  {button:?}"),
                ControlMessage::Up(button) => println!("UP    {button:?}"),
                ControlMessage::State(state) => println!("STATE {:#06x}", state.bits()),
            }
        }
    }

    reader.set_active(false);
    Ok(())
}
