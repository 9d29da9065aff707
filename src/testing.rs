use crate::bus::{Bus, DEFAULT_ADDRESS};
use crate::register::cmd::WRITE_OFFSET;
use crate::register::{Reg, REGISTER_COUNT};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error, ErrorKind, ErrorType, OutputPin};
use embedded_hal::i2c::SevenBitAddress;
use heapless::{Deque, LinearMap, Vec};

const COMMAND_MODE_STATUS: u8 = 0x5A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

/// Emulates the command mode register file and normal mode sample stream of a ZSC31014.
///
/// Read commands select the register returned by the next 3-byte read, write commands update the register file,
/// and 2-byte reads pop the next queued sample. Every successfully written frame is recorded together with the
/// address it was sent to.
pub struct FakeBus {
    address: SevenBitAddress,
    regs: LinearMap<u8, u16, REGISTER_COUNT>,
    selected: Option<u8>,
    samples: Deque<[u8; 2], 32>,
    constant_sample: Option<[u8; 2]>,
    status: u8,
    failing_commands: Vec<u8, 8>,
    fail_reads: bool,
    pub frames: Vec<(SevenBitAddress, [u8; 3]), 64>,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            address: DEFAULT_ADDRESS,
            regs: LinearMap::new(),
            selected: None,
            samples: Deque::new(),
            constant_sample: None,
            status: COMMAND_MODE_STATUS,
            failing_commands: Vec::new(),
            fail_reads: false,
            frames: Vec::new(),
        }
    }

    pub fn with_register<R: Reg>(&mut self, word: u16) {
        self.with_register_code(R::ADDR, word);
    }

    pub fn with_register_code(&mut self, code: u8, word: u16) {
        self.regs.insert(code, word).unwrap();
    }

    pub fn register<R: Reg>(&self) -> u16 {
        *self.regs.get(&R::ADDR).unwrap()
    }

    /// Queues a sample frame with the given status bits and 14-bit value.
    pub fn with_sample(&mut self, status: u8, raw: u16) {
        self.samples.push_back(sample_frame(status, raw)).unwrap();
    }

    /// Sample returned once the queue is drained, for as long as needed.
    pub fn with_constant_sample(&mut self, status: u8, raw: u16) {
        self.constant_sample = Some(sample_frame(status, raw));
    }

    /// Status byte returned in command mode replies.
    pub fn with_status(&mut self, status: u8) {
        self.status = status;
    }

    /// Writes whose command byte is `command` fail.
    pub fn failing_command(&mut self, command: u8) {
        self.failing_commands.push(command).unwrap();
    }

    pub fn failing_reads(&mut self) {
        self.fail_reads = true;
    }

    pub fn commands(&self) -> impl Iterator<Item = u8> + '_ {
        self.frames.iter().map(|(_, frame)| frame[0])
    }
}

impl Bus for FakeBus {
    type Error = FakeBusError;

    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        assert_eq!(3, frame.len(), "command frames are 3 bytes");
        let command = frame[0];
        if self.failing_commands.contains(&command) {
            return Err(FakeBusError);
        }

        self.frames.push((self.address, [frame[0], frame[1], frame[2]])).unwrap();

        let word = u16::from_be_bytes([frame[1], frame[2]]);
        match command {
            code if (code as usize) < REGISTER_COUNT => self.selected = Some(code),
            code if code >= WRITE_OFFSET && ((code - WRITE_OFFSET) as usize) < REGISTER_COUNT => {
                self.regs.insert(code - WRITE_OFFSET, word).unwrap();
            }
            _ => {}
        }

        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(FakeBusError);
        }

        match buffer.len() {
            3 => {
                let code = self.selected.take().expect("read without a preceding read command");
                let word = *self
                    .regs
                    .get(&code)
                    .unwrap_or_else(|| panic!("No mocked value for register 0x{:x}", code));
                let [high, low] = word.to_be_bytes();
                buffer.copy_from_slice(&[self.status, high, low]);
            }
            2 => {
                let sample = self
                    .samples
                    .pop_front()
                    .or(self.constant_sample)
                    .expect("No mocked sample");
                buffer.copy_from_slice(&sample);
            }
            n => panic!("Unexpected read length {}", n),
        }

        Ok(())
    }

    fn address(&self) -> SevenBitAddress {
        self.address
    }

    fn set_address(&mut self, address: SevenBitAddress) {
        self.address = address;
    }
}

fn sample_frame(status: u8, raw: u16) -> [u8; 2] {
    let [high, low] = raw.to_be_bytes();
    [(status << 6) | (high & 0b0011_1111), low]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakePinError;

impl Error for FakePinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Power pin that records every level it is driven to.
pub struct FakePin {
    pub levels: Vec<bool, 16>,
    fail: bool,
}

impl FakePin {
    pub fn new() -> Self {
        FakePin { levels: Vec::new(), fail: false }
    }

    pub fn failing() -> Self {
        FakePin { levels: Vec::new(), fail: true }
    }

    fn drive(&mut self, level: bool) -> Result<(), FakePinError> {
        if self.fail {
            return Err(FakePinError);
        }
        self.levels.push(level).unwrap();

        Ok(())
    }
}

impl ErrorType for FakePin {
    type Error = FakePinError;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

/// Delay that returns immediately and keeps track of the total time requested.
pub struct FakeDelay {
    total_ns: u64,
}

impl FakeDelay {
    pub fn new() -> Self {
        FakeDelay { total_ns: 0 }
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ns += us as u64 * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += ms as u64 * 1_000_000;
    }
}
