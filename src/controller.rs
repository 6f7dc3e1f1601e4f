//! Shared-state controller (§5, §9): the control task owns every
//! user-visible mutation. Other tasks see an immutable snapshot, send
//! commands on a channel, and subscribe to a broadcast of decoded events,
//! so there is no lock a caller can hold across a long computation.

use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

const STATION_MAP_CAPACITY: usize = 200;
const WATERFALL_CAPACITY: usize = 200;
const DECODED_MESSAGES_CAPACITY: usize = 200;
const AUDIO_BUFFER_SECONDS: f32 = 30.0;

/// Last-known state of one heard station (§3 `StationRecord`).
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub callsign: String,
    pub last_heard_unix_seconds: u64,
    pub freq_hz: f32,
    pub snr_db: f32,
    pub grid: Option<String>,
}

/// One decoded record delivered by the RX task to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    pub callsign: Option<String>,
    pub text: String,
    pub freq_hz: f32,
    pub snr_db: f32,
    pub unix_seconds: u64,
}

/// Overall connection/session status surfaced to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Receiving,
    Transmitting,
    ConnectionLost { detail: String },
}

/// A FIFO-bounded append-only collection (§5: "all bounded collections
/// enforce their limits at insertion").
#[derive(Debug, Clone)]
struct Bounded<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> Bounded<T> {
    fn new(capacity: usize) -> Self {
        Self { items: VecDeque::with_capacity(capacity), capacity }
    }

    fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

/// An immutable point-in-time view of controller state, safe to clone and
/// hand to a UI layer with no further locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub status: Status,
    pub stations: Vec<StationRecord>,
    pub waterfall_rows: Vec<Vec<f32>>,
    pub decoded_messages: Vec<DecodedRecord>,
}

/// Commands accepted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetStatus(Status),
    RecordDecoded(DecodedRecord),
    PushWaterfallRow(Vec<f32>),
    ClearStations,
}

struct Inner {
    status: Status,
    stations: HashMap<String, StationRecord>,
    station_order: Bounded<String>,
    waterfall: Bounded<Vec<f32>>,
    decoded: Bounded<DecodedRecord>,
}

impl Inner {
    fn new() -> Self {
        Self {
            status: Status::Idle,
            stations: HashMap::new(),
            station_order: Bounded::new(STATION_MAP_CAPACITY),
            waterfall: Bounded::new(WATERFALL_CAPACITY),
            decoded: Bounded::new(DECODED_MESSAGES_CAPACITY),
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SetStatus(status) => self.status = status,
            Command::RecordDecoded(record) => {
                if let Some(callsign) = record.callsign.clone() {
                    if !self.stations.contains_key(&callsign) && self.stations.len() >= STATION_MAP_CAPACITY {
                        if let Some(evicted) = self.station_order.items.pop_front() {
                            self.stations.remove(&evicted);
                        }
                    }
                    self.stations.insert(
                        callsign.clone(),
                        StationRecord {
                            callsign: callsign.clone(),
                            last_heard_unix_seconds: record.unix_seconds,
                            freq_hz: record.freq_hz,
                            snr_db: record.snr_db,
                            grid: None,
                        },
                    );
                    if !self.station_order.items.contains(&callsign) {
                        self.station_order.push(callsign);
                    }
                }
                self.decoded.push(record);
            }
            Command::PushWaterfallRow(row) => self.waterfall.push(row),
            Command::ClearStations => {
                self.stations.clear();
                self.station_order.items.clear();
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status.clone(),
            stations: self.stations.values().cloned().collect(),
            waterfall_rows: self.waterfall.iter().cloned().collect(),
            decoded_messages: self.decoded.iter().cloned().collect(),
        }
    }
}

/// The control task's owned state, reachable only through [`Command`]s and
/// read only through [`Snapshot`]s (§5, §9).
pub struct Controller {
    inner: Mutex<Inner>,
    events: Mutex<Vec<Sender<DecodedRecord>>>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner::new()), events: Mutex::new(Vec::new()) }
    }

    /// Applies one command, the only way controller state changes.
    pub fn apply(&self, command: Command) {
        if let Command::RecordDecoded(ref record) = command {
            self.broadcast(record.clone());
        }
        self.inner.lock().expect("controller mutex poisoned").apply(command);
    }

    /// Drains `commands` into the controller; intended to run as the body of
    /// the control task's receive loop.
    pub fn run(self: &Arc<Self>, commands: &Receiver<Command>) {
        while let Ok(command) = commands.recv() {
            self.apply(command);
        }
    }

    /// An immutable, independently-readable view of current state.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().expect("controller mutex poisoned").snapshot()
    }

    /// Subscribes to decoded-record events as they are recorded.
    pub fn subscribe(&self) -> Receiver<DecodedRecord> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.events.lock().expect("controller mutex poisoned").push(tx);
        rx
    }

    fn broadcast(&self, record: DecodedRecord) {
        let mut subscribers = self.events.lock().expect("controller mutex poisoned");
        subscribers.retain(|tx| tx.send(record.clone()).is_ok());
    }
}

/// Bounded, mutex-guarded audio capture buffer (§5): evicts the oldest
/// samples once `sample_rate_hz * 30 s` worth have accumulated.
pub struct AudioCaptureBuffer {
    samples: Mutex<VecDeque<f32>>,
    capacity_samples: usize,
}

impl AudioCaptureBuffer {
    pub fn new(sample_rate_hz: f32) -> Self {
        Self {
            samples: Mutex::new(VecDeque::new()),
            capacity_samples: (sample_rate_hz * AUDIO_BUFFER_SECONDS) as usize,
        }
    }

    /// Appends `chunk`, evicting the oldest samples if over capacity.
    pub fn push(&self, chunk: &[f32]) {
        let mut samples = self.samples.lock().expect("audio buffer mutex poisoned");
        samples.extend(chunk.iter().copied());
        while samples.len() > self.capacity_samples {
            samples.pop_front();
        }
    }

    /// Snapshots the current buffer contents without draining it (the RX
    /// task "snapshots the shared audio buffer, releases the buffer lock").
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples.lock().expect("audio buffer mutex poisoned").iter().copied().collect()
    }

    pub fn clear(&self) {
        self.samples.lock().expect("audio buffer mutex poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(callsign: &str, t: u64) -> DecodedRecord {
        DecodedRecord {
            callsign: Some(callsign.to_string()),
            text: format!("CQ {callsign}"),
            freq_hz: 1500.0,
            snr_db: -10.0,
            unix_seconds: t,
        }
    }

    #[test]
    fn recording_a_decode_updates_station_map_and_message_log() {
        let controller = Controller::new();
        controller.apply(Command::RecordDecoded(record("DL1ABC", 100)));

        let snap = controller.snapshot();
        assert_eq!(snap.stations.len(), 1);
        assert_eq!(snap.stations[0].callsign, "DL1ABC");
        assert_eq!(snap.decoded_messages.len(), 1);
    }

    #[test]
    fn station_map_evicts_oldest_entry_past_capacity() {
        let controller = Controller::new();
        for i in 0..(STATION_MAP_CAPACITY + 5) {
            controller.apply(Command::RecordDecoded(record(&format!("CALL{i}"), i as u64)));
        }
        let snap = controller.snapshot();
        assert_eq!(snap.stations.len(), STATION_MAP_CAPACITY);
        assert!(!snap.stations.iter().any(|s| s.callsign == "CALL0"));
    }

    #[test]
    fn decoded_messages_are_fifo_bounded() {
        let controller = Controller::new();
        for i in 0..(DECODED_MESSAGES_CAPACITY + 3) {
            controller.apply(Command::RecordDecoded(record(&format!("CALL{i}"), i as u64)));
        }
        let snap = controller.snapshot();
        assert_eq!(snap.decoded_messages.len(), DECODED_MESSAGES_CAPACITY);
        assert_eq!(snap.decoded_messages[0].text, "CQ CALL3");
    }

    #[test]
    fn waterfall_history_is_fifo_bounded() {
        let controller = Controller::new();
        for i in 0..(WATERFALL_CAPACITY + 1) {
            controller.apply(Command::PushWaterfallRow(vec![i as f32]));
        }
        let snap = controller.snapshot();
        assert_eq!(snap.waterfall_rows.len(), WATERFALL_CAPACITY);
        assert_eq!(snap.waterfall_rows[0], vec![1.0]);
    }

    #[test]
    fn subscribers_receive_broadcast_decoded_records() {
        let controller = Controller::new();
        let rx = controller.subscribe();
        controller.apply(Command::RecordDecoded(record("DL1ABC", 1)));
        let received = rx.try_recv().unwrap();
        assert_eq!(received.callsign.as_deref(), Some("DL1ABC"));
    }

    #[test]
    fn audio_capture_buffer_evicts_oldest_samples_past_thirty_seconds() {
        let buffer = AudioCaptureBuffer::new(10.0);
        buffer.push(&vec![1.0; 250]);
        buffer.push(&vec![2.0; 100]);
        let snap = buffer.snapshot();
        assert_eq!(snap.len(), 300);
        assert_eq!(snap[0], 1.0);
        assert_eq!(snap[299], 2.0);

        buffer.clear();
        assert!(buffer.snapshot().is_empty());
    }
}
