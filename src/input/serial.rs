//! Serial attitude stream adapter
//!
//! The accelerometer device sends newline-terminated records of
//! comma-separated fields. The primary form is four raw fields
//! `x,y,z,touch`: the axes are exponentially smoothed, roll and pitch are
//! derived from the smoothed vector, and small rolls are held at the last
//! significant tilt for a moment before easing back to center. Older
//! firmware sends pre-computed `roll,pitch` or `roll,pitch,touch` records;
//! those skip the derivation and are smoothed directly. The touch flag is
//! edge-triggered with a cooldown and maps to a height-up command.
//! Malformed records are dropped without affecting player state.

use super::Command;

/// Smoothing factor for the exponential filter
const SMOOTHING_FACTOR: f32 = 0.2;
/// Minimum gap between touch-triggered height steps
const TOUCH_COOLDOWN_MS: u64 = 200;
/// Minimum derived roll (degrees) that counts as deliberate tilt
const ROLL_THRESHOLD_DEG: f32 = 5.0;
/// How long a sub-threshold roll holds the last deliberate tilt
const ROLL_HOLD_MS: u64 = 1000;
/// Per-sample easing of the held roll back to center after the hold
const ROLL_RETURN_RATE: f32 = 0.1;

/// Raw accelerometer sample, the device's primary record form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub touch: bool,
}

/// Pre-computed attitude, the legacy record form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeRecord {
    pub roll: f32,
    pub pitch: f32,
    pub touch: Option<bool>,
}

/// One decoded record from the stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SerialRecord {
    Axes(AxesRecord),
    Attitude(AttitudeRecord),
}

fn parse_field(field: &str) -> Option<f32> {
    let value: f32 = field.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_touch(field: &str) -> Option<bool> {
    Some(field.trim().parse::<u8>().ok()? != 0)
}

/// Parse a single line from the stream. Four numeric fields are a raw axes
/// record; two or three are the legacy attitude form. Anything else is
/// `None`.
pub fn parse_record(line: &str) -> Option<SerialRecord> {
    let line = line.trim();
    if line.is_empty() || !line.contains(',') {
        return None;
    }
    let fields: Vec<&str> = line.split(',').collect();
    match fields.as_slice() {
        [x, y, z, t] => Some(SerialRecord::Axes(AxesRecord {
            x: parse_field(x)?,
            y: parse_field(y)?,
            z: parse_field(z)?,
            touch: parse_touch(t)?,
        })),
        [r, p] => Some(SerialRecord::Attitude(AttitudeRecord {
            roll: parse_field(r)?,
            pitch: parse_field(p)?,
            touch: None,
        })),
        [r, p, t] => Some(SerialRecord::Attitude(AttitudeRecord {
            roll: parse_field(r)?,
            pitch: parse_field(p)?,
            touch: Some(parse_touch(t)?),
        })),
        _ => None,
    }
}

/// Stateful filter turning raw records into commands
#[derive(Debug, Default)]
pub struct AttitudeFilter {
    smoothed_x: f32,
    smoothed_y: f32,
    smoothed_z: f32,
    smoothed_roll: f32,
    smoothed_pitch: f32,
    target_roll: f32,
    last_roll_update_ms: u64,
    last_touch: bool,
    last_touch_ms: u64,
}

impl AttitudeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line; `now_ms` is a monotonic timestamp supplied by the
    /// caller so the cooldowns are testable without a real clock.
    pub fn ingest_line(&mut self, line: &str, now_ms: u64) -> Vec<Command> {
        match parse_record(line) {
            Some(record) => self.ingest(record, now_ms),
            None => Vec::new(),
        }
    }

    /// Feed one decoded record
    pub fn ingest(&mut self, record: SerialRecord, now_ms: u64) -> Vec<Command> {
        match record {
            SerialRecord::Axes(axes) => self.ingest_axes(axes, now_ms),
            SerialRecord::Attitude(attitude) => self.ingest_attitude(attitude, now_ms),
        }
    }

    fn ingest_axes(&mut self, axes: AxesRecord, now_ms: u64) -> Vec<Command> {
        self.smoothed_x += SMOOTHING_FACTOR * (axes.x - self.smoothed_x);
        self.smoothed_y += SMOOTHING_FACTOR * (axes.y - self.smoothed_y);
        self.smoothed_z += SMOOTHING_FACTOR * (axes.z - self.smoothed_z);

        let (sx, sy, sz) = (self.smoothed_x, self.smoothed_y, self.smoothed_z);
        let roll = sx.atan2((sy * sy + sz * sz).sqrt()).to_degrees();
        let pitch = (-sy).atan2((sx * sx + sz * sz).sqrt()).to_degrees();

        // Small rolls hold the last deliberate tilt for a moment, then
        // ease back to center; this keeps a relaxed hand from drifting
        let final_roll = if roll.abs() > ROLL_THRESHOLD_DEG {
            self.target_roll = roll;
            self.last_roll_update_ms = now_ms;
            roll
        } else if now_ms.saturating_sub(self.last_roll_update_ms) < ROLL_HOLD_MS {
            self.target_roll
        } else {
            self.target_roll -= ROLL_RETURN_RATE * self.target_roll;
            self.target_roll
        };

        let mut commands = vec![Command::SetAttitude {
            roll: final_roll,
            pitch,
        }];
        self.process_touch(axes.touch, now_ms, &mut commands);
        commands
    }

    fn ingest_attitude(&mut self, record: AttitudeRecord, now_ms: u64) -> Vec<Command> {
        self.smoothed_roll += SMOOTHING_FACTOR * (record.roll - self.smoothed_roll);
        self.smoothed_pitch += SMOOTHING_FACTOR * (record.pitch - self.smoothed_pitch);

        let mut commands = vec![Command::SetAttitude {
            roll: self.smoothed_roll,
            pitch: self.smoothed_pitch,
        }];
        if let Some(touch) = record.touch {
            self.process_touch(touch, now_ms, &mut commands);
        }
        commands
    }

    fn process_touch(&mut self, touch: bool, now_ms: u64, commands: &mut Vec<Command>) {
        if touch != self.last_touch && now_ms.saturating_sub(self.last_touch_ms) > TOUCH_COOLDOWN_MS
        {
            if touch {
                commands.push(Command::UnlockAudio);
                commands.push(Command::AdjustHeight(1));
                self.last_touch_ms = now_ms;
            }
            self.last_touch = touch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll_of(commands: &[Command]) -> f32 {
        match commands.first() {
            Some(Command::SetAttitude { roll, .. }) => *roll,
            other => panic!("expected an attitude command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_four_field_axes_record() {
        let record = parse_record("512,-256,1024,1").unwrap();
        assert_eq!(
            record,
            SerialRecord::Axes(AxesRecord {
                x: 512.0,
                y: -256.0,
                z: 1024.0,
                touch: true,
            })
        );
    }

    #[test]
    fn test_parse_two_field_record() {
        let record = parse_record("12.5,-3.0").unwrap();
        assert_eq!(
            record,
            SerialRecord::Attitude(AttitudeRecord {
                roll: 12.5,
                pitch: -3.0,
                touch: None,
            })
        );
    }

    #[test]
    fn test_parse_three_field_record_with_touch() {
        let touch = |line| match parse_record(line) {
            Some(SerialRecord::Attitude(r)) => r.touch,
            other => panic!("expected attitude record, got {other:?}"),
        };
        assert_eq!(touch(" 1.0 , 2.0 , 1 "), Some(true));
        assert_eq!(touch("1.0,2.0,0"), Some(false));
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        assert!(parse_record("").is_none());
        assert!(parse_record("garbage").is_none());
        assert!(parse_record("1.0").is_none());
        assert!(parse_record("a,b").is_none());
        assert!(parse_record("1.0,2.0,x").is_none());
        assert!(parse_record("1,2,x,4").is_none());
        assert!(parse_record("1,2,3,4,5").is_none());
        assert!(parse_record("NaN,2.0").is_none());
    }

    #[test]
    fn test_axes_record_derives_attitude() {
        let mut filter = AttitudeFilter::new();
        // Pure lateral acceleration converges to a 90-degree roll
        let mut commands = Vec::new();
        for i in 0..50 {
            commands = filter.ingest_line("1000,0,0,0", i * 20);
        }
        match commands.as_slice() {
            [Command::SetAttitude { roll, pitch }] => {
                assert!((roll - 90.0).abs() < 0.5, "roll = {roll}");
                assert!(pitch.abs() < 0.5, "pitch = {pitch}");
            }
            other => panic!("expected one attitude command, got {other:?}"),
        }
    }

    #[test]
    fn test_level_axes_stay_centered() {
        let mut filter = AttitudeFilter::new();
        for i in 0..20 {
            let commands = filter.ingest_line("0,0,-1000,0", i * 20);
            assert_eq!(roll_of(&commands), 0.0);
        }
    }

    #[test]
    fn test_small_roll_holds_then_returns_to_center() {
        let mut filter = AttitudeFilter::new();
        // Settle just above the 5-degree threshold: atan2(100, 1000) = 5.71
        let mut held = 0.0;
        for i in 0..60 {
            held = roll_of(&filter.ingest_line("100,0,-1000,0", i * 10));
        }
        assert!(held > ROLL_THRESHOLD_DEG);

        // Leveling out drops the derived roll below the threshold, but the
        // emitted roll holds the last deliberate tilt during the window
        let in_hold = roll_of(&filter.ingest_line("0,0,-1000,0", 700));
        assert!((in_hold - held).abs() < 0.1, "in_hold = {in_hold}, held = {held}");

        // After the hold window the emitted roll eases toward center
        let eased = roll_of(&filter.ingest_line("0,0,-1000,0", 2000));
        assert!(eased < in_hold - 0.1, "eased = {eased}");
        let eased_more = roll_of(&filter.ingest_line("0,0,-1000,0", 2100));
        assert!(eased_more < eased);
    }

    #[test]
    fn test_legacy_smoothing_converges_toward_input() {
        let mut filter = AttitudeFilter::new();
        let mut last_roll = 0.0;
        for i in 0..50 {
            let commands = filter.ingest_line("10.0,0.0", i * 20);
            last_roll = roll_of(&commands);
        }
        assert!((last_roll - 10.0).abs() < 0.01);
        // First sample moves only a fraction of the way
        let mut fresh = AttitudeFilter::new();
        let commands = fresh.ingest_line("10.0,0.0", 0);
        match commands.as_slice() {
            [Command::SetAttitude { roll, pitch }] => {
                assert!((roll - 2.0).abs() < 1e-4);
                assert_eq!(*pitch, 0.0);
            }
            other => panic!("expected one attitude command, got {other:?}"),
        }
    }

    #[test]
    fn test_touch_rising_edge_with_cooldown() {
        let mut filter = AttitudeFilter::new();

        // Rising edge triggers one height step plus audio unlock
        let commands = filter.ingest_line("0,0,0,1", 1000);
        assert!(commands.contains(&Command::AdjustHeight(1)));
        assert!(commands.contains(&Command::UnlockAudio));

        // Held touch does not retrigger
        let commands = filter.ingest_line("0,0,0,1", 1050);
        assert!(!commands.contains(&Command::AdjustHeight(1)));

        // Release then retouch inside the cooldown: still suppressed
        filter.ingest_line("0,0,0,0", 1100);
        let commands = filter.ingest_line("0,0,0,1", 1150);
        assert!(!commands.contains(&Command::AdjustHeight(1)));

        // Release then retouch after the cooldown fires again
        filter.ingest_line("0,0,0,0", 1500);
        let commands = filter.ingest_line("0,0,0,1", 1800);
        assert!(commands.contains(&Command::AdjustHeight(1)));
    }

    #[test]
    fn test_legacy_touch_field_still_works() {
        let mut filter = AttitudeFilter::new();
        let commands = filter.ingest_line("0,0,1", 1000);
        assert!(commands.contains(&Command::AdjustHeight(1)));
    }
}
