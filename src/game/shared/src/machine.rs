use std::fmt;

use socketmc_foundation_shared::{
	codec::DecodeError,
	instruction::{Instruction, InstructionId},
	permission::ModPermission,
};
use socketmc_util::{debug::error::ErrorFormatExt, mem::hash::FxHashMap};

use crate::{config::PermissionConfig, packet::InstructionPacket, plugin::SocketPlugin};

// === Machine === //

/// Carries out one kind of instruction on the client.
pub trait Machine {
	fn on_instruction(&mut self, instruction: &Instruction) -> anyhow::Result<()>;
}

impl<F> Machine for F
where
	F: FnMut(&Instruction) -> anyhow::Result<()>,
{
	fn on_instruction(&mut self, instruction: &Instruction) -> anyhow::Result<()> {
		self(instruction)
	}
}

// === MachineRegistry === //

#[derive(Default)]
pub struct MachineRegistry {
	machines: FxHashMap<InstructionId, Box<dyn Machine>>,
}

impl fmt::Debug for MachineRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.machines.keys()).finish()
	}
}

impl MachineRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the machine for `id`. Only the first registration for an id is kept.
	pub fn register(&mut self, id: InstructionId, machine: impl Machine + 'static) -> bool {
		if self.machines.contains_key(&id) {
			log::error!("A machine for instruction {id:?} is already registered; ignoring the new one.");
			return false;
		}

		self.machines.insert(id, Box::new(machine));
		true
	}

	pub fn with(mut self, id: InstructionId, machine: impl Machine + 'static) -> Self {
		self.register(id, machine);
		self
	}

	pub fn get_mut(&mut self, id: InstructionId) -> Option<&mut (dyn Machine + 'static)> {
		self.machines.get_mut(&id).map(|machine| &mut **machine)
	}

	pub fn contains(&self, id: InstructionId) -> bool {
		self.machines.contains_key(&id)
	}

	pub fn ids(&self) -> impl Iterator<Item = InstructionId> + '_ {
		self.machines.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.machines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.machines.is_empty()
	}
}

// === InstructionReceiver === //

/// What happened to a received instruction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dispatch {
	Executed,
	Denied(ModPermission),
	Unhandled,
	Failed,
}

/// Decodes incoming packets and runs them through the permission check into their machine.
#[derive(Debug, Default)]
pub struct InstructionReceiver {
	machines: MachineRegistry,
	permissions: PermissionConfig,
}

impl InstructionReceiver {
	pub fn new(machines: MachineRegistry, permissions: PermissionConfig) -> Self {
		Self {
			machines,
			permissions,
		}
	}

	pub fn machines(&mut self) -> &mut MachineRegistry {
		&mut self.machines
	}

	pub fn permissions(&self) -> &PermissionConfig {
		&self.permissions
	}

	pub fn permissions_mut(&mut self) -> &mut PermissionConfig {
		&mut self.permissions
	}

	pub fn receive(&mut self, bytes: &[u8]) -> Result<Dispatch, DecodeError> {
		let packet = InstructionPacket::decode(bytes)?;
		Ok(self.dispatch(&packet.plugin, &packet.instruction))
	}

	pub fn dispatch(&mut self, plugin: &SocketPlugin, instruction: &Instruction) -> Dispatch {
		let permission = instruction.permission();

		// The sender is never told about a denial.
		if !self.permissions.is_enabled(plugin.id(), permission) {
			log::warn!(
				"Plugin {plugin} tried to run {:?} without the {permission} permission.",
				instruction.id(),
			);
			return Dispatch::Denied(permission);
		}

		let Some(machine) = self.machines.get_mut(instruction.kind()) else {
			log::debug!("No machine handles {:?}; dropping it.", instruction.id());
			return Dispatch::Unhandled;
		};

		match machine.on_instruction(instruction) {
			Ok(()) => {
				log::trace!("Ran {instruction} from {plugin}.");
				Dispatch::Executed
			}
			Err(err) => {
				log::error!(
					"Machine for {:?} failed on an instruction from {plugin}:\n{}",
					instruction.id(),
					err.format_error(),
				);
				Dispatch::Failed
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use anyhow::Context;
	use semver::Version;
	use socketmc_foundation_shared::param::Parameterized;

	use super::*;

	fn packet(instruction: Instruction, plugin: &str) -> Vec<u8> {
		InstructionPacket::new(instruction, SocketPlugin::new(plugin.to_string(), Version::new(1, 0, 0)))
			.encode()
			.unwrap()
	}

	#[test]
	fn dispatches_to_the_registered_machine() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_by_machine = seen.clone();

		let machines = MachineRegistry::new().with(InstructionId::LogMessage, move |instruction: &Instruction| -> anyhow::Result<()> {
			seen_by_machine
				.borrow_mut()
				.push(instruction.first_string_parameter()?.to_string());
			Ok(())
		});
		let mut receiver = InstructionReceiver::new(machines, PermissionConfig::new());

		let bytes = packet(Instruction::log_message("hello").unwrap(), "chat");
		assert_eq!(receiver.receive(&bytes).unwrap(), Dispatch::Executed);
		assert_eq!(*seen.borrow(), ["hello"]);

		let bytes = packet(Instruction::ping(), "chat");
		assert_eq!(receiver.receive(&bytes).unwrap(), Dispatch::Unhandled);
	}

	#[test]
	fn denied_permissions_skip_the_machine() {
		let calls = Rc::new(RefCell::new(0));
		let counter = calls.clone();

		let machines = MachineRegistry::new().with(InstructionId::OsBeep, move |_: &Instruction| -> anyhow::Result<()> {
			*counter.borrow_mut() += 1;
			Ok(())
		});
		let permissions = PermissionConfig::new()
			.with_plugin("noisy", ModPermission::UseAudio, false)
			.unwrap();
		let mut receiver = InstructionReceiver::new(machines, permissions);

		assert_eq!(
			receiver.receive(&packet(Instruction::os_beep(), "noisy")).unwrap(),
			Dispatch::Denied(ModPermission::UseAudio)
		);
		assert_eq!(
			receiver.receive(&packet(Instruction::os_beep(), "quiet")).unwrap(),
			Dispatch::Executed
		);
		assert_eq!(*calls.borrow(), 1);
	}

	#[test]
	fn failures_are_contained() {
		let machines = MachineRegistry::new().with(InstructionId::SetWindowTitle, |instruction: &Instruction| -> anyhow::Result<()> {
			instruction.int_parameter(0).context("window title must be a string")?;
			Ok(())
		});
		let mut receiver = InstructionReceiver::new(machines, PermissionConfig::new());

		let bytes = packet(Instruction::set_window_title("Hi").unwrap(), "titles");
		assert_eq!(receiver.receive(&bytes).unwrap(), Dispatch::Failed);
		assert!(receiver.receive(&bytes[1..]).is_err());
	}

	#[test]
	fn first_registration_wins() {
		let mut machines = MachineRegistry::new();

		assert!(machines.register(InstructionId::Ping, |_: &Instruction| -> anyhow::Result<()> { Ok(()) }));
		assert!(!machines.register(InstructionId::Ping, |_: &Instruction| -> anyhow::Result<()> {
			anyhow::bail!("second")
		}));

		let ping = Instruction::ping();
		let machine = machines.get_mut(InstructionId::Ping).unwrap();
		assert!(machine.on_instruction(&ping).is_ok());
		assert_eq!(machines.len(), 1);
	}
}
