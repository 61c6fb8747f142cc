use std::{cell::RefCell, convert::Infallible, rc::Rc};

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
    spi::{self, ErrorKind, SpiBus},
};
use embedded_hal_mock::eh1::{
    delay::NoopDelay,
    digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
    spi::{Mock as SpiMock, Transaction as SpiTransaction},
};
use sh1106_oled::{
    interface::spi::{BusSetup, SpiConfig, RESET_HIGH_MS, RESET_LOW_MS, RESET_SETTLE_MS},
    Builder, SpiInterface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Dc,
    Rst,
    Cs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Pin(Line, bool),
    Write(Vec<u8>),
    Flush,
    DelayMs(u32),
    Configure(u32),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct FakePin {
    line: Line,
    log: Log,
}

impl digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.line, true));
        Ok(())
    }
}

struct FakeBus {
    log: Log,
    fail: bool,
}

impl spi::ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl SpiBus for FakeBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!()
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        unimplemented!()
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!()
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

struct FakeDelay {
    log: Log,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ns.div_ceil(1_000_000)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

struct RecordingSetup {
    log: Log,
}

impl BusSetup<FakeBus> for RecordingSetup {
    fn apply(&mut self, _spi: &mut FakeBus, config: &SpiConfig) -> Result<(), DisplayError> {
        self.log.borrow_mut().push(Event::Configure(config.frequency));
        Ok(())
    }
}

type FakeInterface<S> = SpiInterface<FakeBus, FakePin, FakePin, FakePin, S>;

fn pins(log: &Log) -> (FakePin, FakePin, FakePin) {
    let pin = |line| FakePin {
        line,
        log: log.clone(),
    };
    (pin(Line::Dc), pin(Line::Rst), pin(Line::Cs))
}

fn fake_interface(log: &Log, fail: bool) -> FakeInterface<sh1106_oled::interface::NoSetup> {
    let (dc, rst, cs) = pins(log);
    let bus = FakeBus {
        log: log.clone(),
        fail,
    };
    let iface = SpiInterface::new(bus, dc, rst, cs, &mut FakeDelay { log: log.clone() }).unwrap();
    log.borrow_mut().clear();
    iface
}

#[test]
fn construction_resets_controller() {
    let log = Log::default();
    let (dc, rst, cs) = pins(&log);
    let bus = FakeBus {
        log: log.clone(),
        fail: false,
    };
    SpiInterface::new(bus, dc, rst, cs, &mut FakeDelay { log: log.clone() }).unwrap();

    assert_eq!(
        *log.borrow(),
        [
            Event::Pin(Line::Dc, false),
            Event::Pin(Line::Rst, false),
            Event::Pin(Line::Cs, true),
            Event::Pin(Line::Rst, true),
            Event::DelayMs(RESET_HIGH_MS),
            Event::Pin(Line::Rst, false),
            Event::DelayMs(RESET_LOW_MS),
            Event::Pin(Line::Rst, true),
            Event::DelayMs(RESET_SETTLE_MS),
        ]
    );
    assert!(RESET_HIGH_MS >= 1 && RESET_LOW_MS >= 10 && RESET_SETTLE_MS >= 100);
}

#[test]
fn command_frame() {
    let log = Log::default();
    let mut iface = fake_interface(&log, false);
    iface.send_commands(DataFormat::U8(&[0x81, 0xFF])).unwrap();

    let frame = |byte| {
        [
            Event::Pin(Line::Cs, true),
            Event::Pin(Line::Dc, false),
            Event::Pin(Line::Cs, false),
            Event::Write(vec![byte]),
            Event::Flush,
            Event::Pin(Line::Cs, true),
        ]
    };
    let expected: Vec<Event> = frame(0x81).into_iter().chain(frame(0xFF)).collect();
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn data_frame() {
    let log = Log::default();
    let mut iface = fake_interface(&log, false);
    iface.send_data(DataFormat::U8(&[0xDE, 0xAD])).unwrap();

    assert_eq!(
        *log.borrow(),
        [
            Event::Pin(Line::Cs, true),
            Event::Pin(Line::Dc, true),
            Event::Pin(Line::Cs, false),
            Event::Write(vec![0xDE, 0xAD]),
            Event::Flush,
            Event::Pin(Line::Cs, true),
        ]
    );
}

#[test]
fn dc_and_cs_levels_during_show() {
    let log = Log::default();
    let iface = fake_interface(&log, false);
    let mut disp = Builder::new(128, 64)
        .connect(iface)
        .unwrap()
        .into_graphics_mode([0u8; 1024])
        .unwrap();
    disp.show().unwrap();

    let mut dc = None;
    let mut cs_high = true;
    let mut writes = 0;
    for event in log.borrow().iter() {
        match event {
            Event::Pin(Line::Dc, level) => {
                assert!(cs_high, "DC changed while selected");
                dc = Some(*level);
            }
            Event::Pin(Line::Cs, level) => cs_high = *level,
            Event::Write(bytes) => {
                assert!(!cs_high);
                // commands are single bytes sent with DC low, pages are 128 bytes with DC high
                assert_eq!(dc, Some(bytes.len() == 128));
                writes += 1;
            }
            _ => {}
        }
    }
    assert!(cs_high);
    assert_eq!(writes, 8 * 4);
}

#[test]
fn failed_write_deselects() {
    let log = Log::default();
    let mut iface = fake_interface(&log, true);

    assert!(matches!(
        iface.send_data(DataFormat::U8(&[1, 2, 3])),
        Err(DisplayError::BusWriteError)
    ));
    assert_eq!(log.borrow().last(), Some(&Event::Pin(Line::Cs, true)));
}

#[test]
fn config_applied_before_every_transfer() {
    let log = Log::default();
    let (dc, rst, cs) = pins(&log);
    let bus = FakeBus {
        log: log.clone(),
        fail: false,
    };
    let config = SpiConfig {
        frequency: 8_000_000,
        ..SpiConfig::default()
    };
    let mut iface = SpiInterface::with_setup(
        bus,
        dc,
        rst,
        cs,
        config,
        RecordingSetup { log: log.clone() },
        &mut FakeDelay { log: log.clone() },
    )
    .unwrap();
    assert_eq!(iface.config().mode, embedded_hal::spi::MODE_0);
    log.borrow_mut().clear();

    iface.send_commands(DataFormat::U8(&[0xAE])).unwrap();
    iface.send_data(DataFormat::U8(&[0])).unwrap();

    let configures: Vec<usize> = log
        .borrow()
        .iter()
        .enumerate()
        .filter(|(_, e)| **e == Event::Configure(8_000_000))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(configures.len(), 2);
    for i in configures {
        assert_eq!(log.borrow()[i - 1], Event::Pin(Line::Cs, false));
        assert!(matches!(log.borrow()[i + 1], Event::Write(_)));
    }
}

#[test]
fn mocked_bus_and_pins() {
    let spi_expectations = [
        SpiTransaction::write_vec(vec![0xAF]),
        SpiTransaction::flush(),
        SpiTransaction::write_vec(vec![0x01, 0x02]),
        SpiTransaction::flush(),
    ];
    let dc_expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let rst_expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let cs_expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];

    let mut iface = SpiInterface::new(
        SpiMock::new(&spi_expectations),
        PinMock::new(&dc_expectations),
        PinMock::new(&rst_expectations),
        PinMock::new(&cs_expectations),
        &mut NoopDelay::new(),
    )
    .unwrap();
    iface.send_commands(DataFormat::U8(&[0xAF])).unwrap();
    iface.send_data(DataFormat::U8(&[0x01, 0x02])).unwrap();

    let (mut spi, mut dc, mut rst, mut cs) = iface.release();
    spi.done();
    dc.done();
    rst.done();
    cs.done();
}
