use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::loader::ShotLoader;
use crate::state::{Delta, LoadRequest, LoaderCommand};

/// Runs player loads off the UI thread. Queued requests are collapsed to the
/// newest one since older generations would be discarded anyway.
pub fn spawn_loader(loader: ShotLoader, tx: Sender<Delta>, cmd_rx: Receiver<LoaderCommand>) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let LoaderCommand::Load(mut request) = cmd;
            while let Ok(LoaderCommand::Load(newer)) = cmd_rx.try_recv() {
                let _ = tx.send(Delta::Log(format!(
                    "[INFO] Skipping superseded load for {}",
                    request.player
                )));
                request = newer;
            }
            if tx.send(run_load(&loader, request)).is_err() {
                break;
            }
        }
    });
}

pub fn run_load(loader: &ShotLoader, request: LoadRequest) -> Delta {
    match loader.load_player(&request.player) {
        Ok(load) => Delta::Loaded {
            generation: request.generation,
            load,
        },
        Err(err) => Delta::LoadFailed {
            generation: request.generation,
            player: request.player,
            error: format!("{err:#}"),
        },
    }
}
