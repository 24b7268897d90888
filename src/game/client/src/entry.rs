use std::{
	cell::RefCell,
	fs::File,
	io::{self, BufReader, BufWriter, Read, Write},
	rc::Rc,
	thread,
	time::Duration,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use semver::Version;
use socketmc_foundation_shared::{
	instruction::Instruction,
	render::{Color, Command, DrawingContextBuilder},
};
use socketmc_shared::{
	config::PermissionConfig,
	machine::{Dispatch, InstructionReceiver, MachineRegistry},
	packet::{read_frame, write_frame, InstructionPacket},
	plugin::{PluginMeta, SocketPlugin},
};
use socketmc_util::debug::error::ErrorFormatExt;

use crate::headless::{register_machines, HeadlessClient};

// === Clap === //

#[derive(Debug, Clone, Parser)]
#[command(about = "headless receiver for socketmc instructions", long_about = None)]
struct CliArgs {
	#[command(subcommand)]
	command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum CliCommand {
	/// Replays a stream of framed instruction packets.
	Run(CliRunCommand),
	/// Writes a short sample stream of framed instruction packets.
	Demo(CliDemoCommand),
}

#[derive(Debug, Clone, Args)]
struct CliRunCommand {
	#[arg(short = 'c', long = "config", name = "path to permission config")]
	config: Option<String>,

	#[arg(long = "tick-ms", default_value_t = 50)]
	tick_ms: u64,

	/// File of length-prefixed packets, or `-` for stdin.
	#[arg(default_value = "-")]
	input: String,
}

#[derive(Debug, Clone, Args)]
struct CliDemoCommand {
	/// Where to write the stream, or `-` for stdout.
	#[arg(default_value = "-")]
	output: String,
}

// === Driver === //

pub fn main_inner() -> anyhow::Result<()> {
	let cmd = CliArgs::parse();

	match &cmd.command {
		CliCommand::Run(sub) => do_cli_run_command(sub),
		CliCommand::Demo(sub) => do_cli_demo_command(sub),
	}
}

fn do_cli_run_command(sub: &CliRunCommand) -> anyhow::Result<()> {
	// Load config
	let permissions = match &sub.config {
		Some(path) => PermissionConfig::load(path)
			.with_context(|| format!("failed to load permission config from {path:?}"))?,
		None => PermissionConfig::new(),
	};

	// Open the packet stream
	let input: Box<dyn Read> = if sub.input == "-" {
		Box::new(io::stdin().lock())
	} else {
		Box::new(
			File::open(&sub.input)
				.with_context(|| format!("failed to open packet stream {:?}", sub.input))?,
		)
	};

	let client = Rc::new(RefCell::new(HeadlessClient::new()));
	let mut machines = MachineRegistry::new();
	register_machines(&mut machines, &client);

	let mut receiver = InstructionReceiver::new(machines, permissions);
	let stats = replay(&mut receiver, BufReader::new(input))?;
	log::info!(
		"Replayed {} packet(s): {} executed, {} denied, {} failed, {} rejected.",
		stats.total(),
		stats.executed,
		stats.denied,
		stats.failed,
		stats.rejected,
	);

	// Let timed effects run out
	let tick = Duration::from_millis(sub.tick_ms.max(1));
	while client.borrow().pending() > 0 {
		thread::sleep(tick);
		client.borrow_mut().tick();
	}

	log::info!("All effects expired; shutting down.");
	Ok(())
}

fn do_cli_demo_command(sub: &CliDemoCommand) -> anyhow::Result<()> {
	let output: Box<dyn Write> = if sub.output == "-" {
		Box::new(io::stdout().lock())
	} else {
		Box::new(
			File::create(&sub.output)
				.with_context(|| format!("failed to create {:?}", sub.output))?,
		)
	};

	let mut output = BufWriter::new(output);
	for packet in demo_packets()? {
		let bytes = packet.encode().context("failed to encode demo packet")?;
		write_frame(&mut output, &bytes)?;
	}
	output.flush()?;

	Ok(())
}

// === Replay === //

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
struct ReplayStats {
	executed: usize,
	denied: usize,
	unhandled: usize,
	failed: usize,
	rejected: usize,
}

impl ReplayStats {
	fn total(&self) -> usize {
		self.executed + self.denied + self.unhandled + self.failed + self.rejected
	}
}

/// Feeds every frame of `reader` through the receiver. Malformed packets are logged and skipped
/// while a broken stream aborts the replay.
fn replay(receiver: &mut InstructionReceiver, mut reader: impl Read) -> anyhow::Result<ReplayStats> {
	let mut stats = ReplayStats::default();

	while let Some(frame) = read_frame(&mut reader).context("failed to read packet frame")? {
		match receiver.receive(&frame) {
			Ok(Dispatch::Executed) => stats.executed += 1,
			Ok(Dispatch::Denied(_)) => stats.denied += 1,
			Ok(Dispatch::Unhandled) => stats.unhandled += 1,
			Ok(Dispatch::Failed) => stats.failed += 1,
			Err(err) => {
				log::warn!("Dropping malformed packet.");
				err.log_at(log::Level::Warn);
				stats.rejected += 1;
			}
		}
	}

	Ok(stats)
}

fn demo_packets() -> anyhow::Result<Vec<InstructionPacket>> {
	let plugin = SocketPlugin::new("demo", Version::new(1, 0, 0)).with_meta(
		PluginMeta::default()
			.with_name("Demo")
			.with_version(env!("CARGO_PKG_VERSION")),
	);

	let context = DrawingContextBuilder::new()
		.with(Command::fill(0, 0, 120, 20, Color::BLACK)?)
		.with(Command::outline(0, 0, 120, 20, Color::WHITE)?)
		.build();

	let instructions = [
		Instruction::ping(),
		Instruction::log_message("Connected to the demo plugin.")?,
		Instruction::set_window_title("SocketMC Demo")?,
		Instruction::draw_text(8, 8, "Hello from the server", 1_500)?,
		Instruction::draw_context(context, 1_000)?,
		Instruction::draw_beacon_beam(0, 64, 0, 32, 2_000)?,
		Instruction::narrate("Welcome", false)?,
	];

	Ok(instructions
		.into_iter()
		.map(|instruction| InstructionPacket::new(instruction, plugin.clone()))
		.collect())
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use socketmc_foundation_shared::{permission::ModPermission, time::ManualClock};

	use super::*;

	fn stream(packets: &[InstructionPacket]) -> Vec<u8> {
		let mut bytes = Vec::new();
		for packet in packets {
			write_frame(&mut bytes, &packet.encode().unwrap()).unwrap();
		}
		bytes
	}

	#[test]
	fn demo_stream_replays() {
		let clock = ManualClock::new(0);
		let client = Rc::new(RefCell::new(HeadlessClient::with_clock(clock.clone())));
		let mut machines = MachineRegistry::new();
		register_machines(&mut machines, &client);
		let mut receiver = InstructionReceiver::new(machines, PermissionConfig::new());

		let packets = demo_packets().unwrap();
		let stats = replay(&mut receiver, Cursor::new(stream(&packets))).unwrap();

		assert_eq!(stats.executed, packets.len());
		assert_eq!(client.borrow().window_title.as_deref(), Some("SocketMC Demo"));
		assert_eq!(client.borrow().pending(), 3);

		clock.advance(2_000);
		client.borrow_mut().tick();
		assert_eq!(client.borrow().pending(), 0);
	}

	#[test]
	fn bad_packets_are_skipped() {
		let client = Rc::new(RefCell::new(HeadlessClient::with_clock(ManualClock::new(0))));
		let mut machines = MachineRegistry::new();
		register_machines(&mut machines, &client);

		let permissions = PermissionConfig::new()
			.with_global(ModPermission::UseGui, false)
			.unwrap();
		let mut receiver = InstructionReceiver::new(machines, permissions);

		let plugin = SocketPlugin::new("demo", Version::new(1, 0, 0));
		let mut bytes = stream(&[
			InstructionPacket::new(Instruction::draw_text(0, 0, "hidden", 100).unwrap(), plugin.clone()),
			InstructionPacket::new(Instruction::os_beep(), plugin),
		]);
		write_frame(&mut bytes, b"not a packet").unwrap();

		let stats = replay(&mut receiver, Cursor::new(bytes)).unwrap();
		assert_eq!(
			stats,
			ReplayStats {
				executed: 1,
				denied: 1,
				rejected: 1,
				..ReplayStats::default()
			}
		);
		assert_eq!(client.borrow().pending(), 0);
	}

	#[test]
	fn truncated_streams_abort() {
		let mut receiver = InstructionReceiver::default();
		assert!(replay(&mut receiver, Cursor::new(vec![0, 0, 0, 8, 1])).is_err());
	}
}
