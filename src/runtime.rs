//! Dedicated simulation thread
//!
//! The loop runs best-effort at the target frame rate: drain commands, drain
//! sensor samples in arrival order, tick once, publish the frame, sleep off
//! the rest of the budget (no sleep when over budget). Sensor callbacks only
//! ever touch the channel; readers only ever see whole published frames.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::level::Level;
use crate::sim::{Command, FrameState, SensorSample, SetupError, Simulation};
use crate::tuning::Tuning;

/// Producer end of the sensor channel, for the sensor callback thread
#[derive(Debug, Clone)]
pub struct SensorSender(Sender<SensorSample>);

impl SensorSender {
    /// Queue a sample for the next frame. Returns false once the simulation has stopped.
    pub fn send(&self, sample: SensorSample) -> bool {
        self.0.send(sample).is_ok()
    }
}

enum Control {
    Command(Command),
    Shutdown,
}

/// Handle to a running simulation thread. Dropping it stops the thread.
pub struct SimulationThread {
    control: Sender<Control>,
    sensors: Sender<SensorSample>,
    frame: Arc<Mutex<FrameState>>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationThread {
    /// Validate the setup and start the loop
    pub fn spawn(level: Level, tuning: Tuning) -> Result<Self, SetupError> {
        let sim = Simulation::new(level, tuning)?;
        let frame = Arc::new(Mutex::new(sim.frame()));
        let (control_tx, control_rx) = mpsc::channel();
        let (sensor_tx, sensor_rx) = mpsc::channel();

        let shared = Arc::clone(&frame);
        let handle = thread::Builder::new()
            .name("simulation".into())
            .spawn(move || run_loop(sim, control_rx, sensor_rx, shared))
            .map_err(SetupError::Spawn)?;

        Ok(Self {
            control: control_tx,
            sensors: sensor_tx,
            frame,
            handle: Some(handle),
        })
    }

    pub fn sensor_sender(&self) -> SensorSender {
        SensorSender(self.sensors.clone())
    }

    /// Send a UI intent. Returns false once the simulation has stopped.
    pub fn send(&self, command: Command) -> bool {
        self.control.send(Control::Command(command)).is_ok()
    }

    /// Latest published frame
    pub fn frame(&self) -> FrameState {
        self.frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop the loop, wait for it and return the last frame
    pub fn shutdown(mut self) -> FrameState {
        self.stop();
        self.frame()
    }

    fn stop(&mut self) {
        let _ = self.control.send(Control::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Simulation thread panicked");
            }
        }
    }
}

impl Drop for SimulationThread {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(
    mut sim: Simulation,
    control: Receiver<Control>,
    sensors: Receiver<SensorSample>,
    frame: Arc<Mutex<FrameState>>,
) {
    let budget = Duration::from_secs_f32(sim.tuning().frame_budget());
    let start = Instant::now();
    log::info!("Simulation thread running at {:.0} Hz", sim.tuning().target_fps);

    loop {
        let frame_start = Instant::now();

        loop {
            match control.try_recv() {
                Ok(Control::Command(command)) => {
                    if let Err(err) = sim.apply(command) {
                        log::warn!("Command rejected: {}", err);
                    }
                }
                Ok(Control::Shutdown) | Err(TryRecvError::Disconnected) => {
                    log::info!("Simulation thread stopping");
                    return;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        while let Ok(sample) = sensors.try_recv() {
            sim.on_raw_sensor_sample(sample);
        }

        let now_ms = start.elapsed().as_millis() as u64;
        let published = sim.tick(now_ms);
        *frame.lock().unwrap_or_else(PoisonError::into_inner) = published;

        if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
