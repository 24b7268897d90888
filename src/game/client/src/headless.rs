use std::{cell::RefCell, rc::Rc};

use anyhow::Context;
use socketmc_foundation_shared::{
	instruction::{Instruction, InstructionId, RenderInstruction},
	lifecycle::LifecycleMap,
	param::{Parameterized, Uri},
	screen::{Overlay, Toast},
	time::{Clock, SystemClock},
};
use socketmc_shared::machine::{Machine, MachineRegistry};
use socketmc_util::mem::hash::FxHashSet;
use uuid::Uuid;

// === HeadlessClient === //

/// Vanilla picks the display time of system and tutorial toasts itself. This is its default.
const VANILLA_TOAST_MILLIS: i64 = 5_000;

/// Client state driven purely by instructions, with no game attached.
///
/// Timed effects live in [`LifecycleMap`]s and disappear once [`HeadlessClient::tick`] finds
/// them expired. Everything the real client would hand to the operating system is logged instead.
#[derive(Debug)]
pub struct HeadlessClient<C: Clock = SystemClock> {
	pub hud: LifecycleMap<Instruction, C>,
	pub beams: LifecycleMap<Instruction, C>,
	pub toasts: LifecycleMap<Toast, C>,
	pub overlay: Option<Overlay>,
	pub screen: Option<String>,
	pub window_title: Option<String>,
	pub hidden_players: FxHashSet<Uuid>,
}

impl HeadlessClient {
	pub fn new() -> Self {
		Self::with_clock(SystemClock)
	}
}

impl<C: Clock + Clone> HeadlessClient<C> {
	pub fn with_clock(clock: C) -> Self {
		Self {
			hud: LifecycleMap::with_clock(clock.clone()),
			beams: LifecycleMap::with_clock(clock.clone()),
			toasts: LifecycleMap::with_clock(clock),
			overlay: None,
			screen: None,
			window_title: None,
			hidden_players: FxHashSet::default(),
		}
	}
}

impl<C: Clock> HeadlessClient<C> {
	pub fn apply(&mut self, instruction: &Instruction) -> anyhow::Result<()> {
		match instruction.kind() {
			InstructionId::Ping => log::debug!("Pong."),
			InstructionId::LogMessage => {
				log::info!("[server] {}", instruction.first_string_parameter()?);
			}
			InstructionId::DrawText
			| InstructionId::DrawShape
			| InstructionId::DrawBuffer
			| InstructionId::DrawTexture
			| InstructionId::DrawItemStack
			| InstructionId::DrawContext => {
				let millis = instruction
					.last_long_parameter()
					.context("timed draw instruction carries no duration")?;
				self.hud.store(instruction.clone(), millis)?;
			}
			InstructionId::DrawBeaconBeam => {
				let millis = instruction
					.last_long_parameter()
					.context("beacon beam carries no duration")?;
				self.beams.store(instruction.clone(), millis)?;
			}
			InstructionId::PlayAudio => {
				let audio = instruction.first_parameter_as::<&[u8]>()?;
				log::info!("Playing {} bytes of audio.", audio.len());
			}
			InstructionId::Narrate => {
				let text = instruction.string_parameter(0)?;
				if instruction.bool_parameter(1)? {
					log::info!("Narrating (interrupting): {text}");
				} else {
					log::info!("Narrating: {text}");
				}
			}
			InstructionId::OsBeep => log::info!("Beep."),
			InstructionId::OpenBookAndQuill => self.screen = Some("book_and_quill".to_string()),
			InstructionId::OpenScreen => {
				self.screen = Some(instruction.first_string_parameter()?.to_string());
			}
			InstructionId::CloseScreen => self.screen = None,
			InstructionId::Renderer => {
				let renderer = instruction.first_parameter_as::<&RenderInstruction>()?;
				log::debug!(
					"Renderer operation {} on {:?} with {} parameter(s).",
					renderer.operation(),
					renderer.target(),
					renderer.parameters().len(),
				);
			}
			InstructionId::DisplayToast => {
				let toast = instruction.first_parameter_as::<&Toast>()?;
				let millis = match toast.duration() {
					Toast::VANILLA_DURATION => VANILLA_TOAST_MILLIS,
					millis => millis,
				};
				self.toasts.store(toast.clone(), millis)?;
			}
			InstructionId::SetOverlay => {
				self.overlay = if instruction.first_parameter()?.is_null() {
					None
				} else {
					Some(instruction.first_parameter_as::<&Overlay>()?.clone())
				};
			}
			InstructionId::SetWindowIcon => {
				let png = instruction.first_parameter_as::<&[u8]>()?;
				log::info!("Window icon replaced ({} bytes).", png.len());
			}
			InstructionId::SetWindowTitle => {
				self.window_title = Some(instruction.first_string_parameter()?.to_string());
			}
			InstructionId::ShowPlayers => {
				for index in 0..instruction.parameters().len() {
					self.hidden_players
						.remove(&instruction.parameter_as::<Uuid>(index)?);
				}
			}
			InstructionId::HidePlayers => {
				for index in 0..instruction.parameters().len() {
					self.hidden_players
						.insert(instruction.parameter_as::<Uuid>(index)?);
				}
			}
			InstructionId::OpenLink | InstructionId::Mailto => {
				let uri = instruction.first_parameter_as::<&Uri>()?;
				log::info!("Would open {uri} in the desktop browser.");
			}
			InstructionId::ExternalWindowPopup | InstructionId::ExternalWindowMessageBox => {
				log::info!(
					"Would show a native dialog {:?}: {}",
					instruction.string_parameter(0)?,
					instruction.string_parameter(1)?,
				);
			}
		}

		Ok(())
	}

	/// Sweeps every expired effect, returning how many were dropped.
	pub fn tick(&mut self) -> usize {
		let removed = self.hud.run() + self.beams.run() + self.toasts.run();

		for effect in self.hud.iter().chain(self.beams.iter()) {
			log::trace!("Rendering {effect}.");
		}
		for toast in self.toasts.iter() {
			log::trace!("Showing {:?} toast.", toast.kind());
		}

		removed
	}

	/// Effects that will still expire on their own.
	pub fn pending(&self) -> usize {
		self.hud.len() + self.beams.len() + self.toasts.len()
	}
}

// === Machines === //

/// Routes instructions into a shared [`HeadlessClient`].
pub struct HeadlessMachine<C: Clock> {
	client: Rc<RefCell<HeadlessClient<C>>>,
}

impl<C: Clock> Machine for HeadlessMachine<C> {
	fn on_instruction(&mut self, instruction: &Instruction) -> anyhow::Result<()> {
		self.client.borrow_mut().apply(instruction)
	}
}

/// Registers a machine for every instruction kind, all feeding the same client.
pub fn register_machines<C: Clock + 'static>(
	registry: &mut MachineRegistry,
	client: &Rc<RefCell<HeadlessClient<C>>>,
) {
	for &id in InstructionId::ALL {
		registry.register(
			id,
			HeadlessMachine {
				client: client.clone(),
			},
		);
	}
}

#[cfg(test)]
mod tests {
	use socketmc_foundation_shared::{
		render::{Color, DrawingContext, PlainText},
		screen::{DefaultScreen, SystemToast},
		time::ManualClock,
	};

	use super::*;

	#[test]
	fn timed_effects_expire() {
		let clock = ManualClock::new(1_000);
		let mut client = HeadlessClient::with_clock(clock.clone());

		client
			.apply(&Instruction::draw_text(4, 4, "hello", 100).unwrap())
			.unwrap();
		client
			.apply(&Instruction::draw_beacon_beam(10, 64, 10, 20, 300).unwrap())
			.unwrap();
		assert_eq!(client.pending(), 2);

		clock.advance(150);
		assert_eq!(client.tick(), 1);
		assert!(client.hud.is_empty());
		assert_eq!(client.beams.len(), 1);

		clock.advance(200);
		assert_eq!(client.tick(), 1);
		assert_eq!(client.pending(), 0);
	}

	#[test]
	fn vanilla_toasts_use_the_default_time() {
		let clock = ManualClock::new(0);
		let mut client = HeadlessClient::with_clock(clock.clone());
		let toast = Toast::system(SystemToast::PeriodicNotification, &PlainText::new("Saved"));

		client.apply(&Instruction::display_toast(toast.clone())).unwrap();
		assert_eq!(client.toasts.remaining_time(&toast), VANILLA_TOAST_MILLIS);

		clock.advance(VANILLA_TOAST_MILLIS - 1);
		assert_eq!(client.tick(), 0);
		assert_eq!(client.pending(), 1);

		clock.advance(1);
		assert_eq!(client.tick(), 1);
		assert!(client.toasts.is_empty());
	}

	#[test]
	fn window_and_screen_state() {
		let mut client = HeadlessClient::with_clock(ManualClock::new(0));

		client
			.apply(&Instruction::set_window_title("Arena").unwrap())
			.unwrap();
		client
			.apply(&Instruction::open_screen(DefaultScreen::Options))
			.unwrap();
		assert_eq!(client.window_title.as_deref(), Some("Arena"));
		assert!(client.screen.is_some());

		client.apply(&Instruction::close_screen()).unwrap();
		assert_eq!(client.screen, None);

		let overlay = Overlay::new(DrawingContext::default(), false);
		client
			.apply(&Instruction::set_overlay(Some(overlay.clone())))
			.unwrap();
		assert_eq!(client.overlay, Some(overlay));

		client.apply(&Instruction::set_overlay(None)).unwrap();
		assert_eq!(client.overlay, None);
	}

	#[test]
	fn players_hide_and_show() {
		let mut client = HeadlessClient::with_clock(ManualClock::new(0));
		let (a, b) = (Uuid::from_u128(1), Uuid::from_u128(2));

		client.apply(&Instruction::hide_players([a, b]).unwrap()).unwrap();
		client.apply(&Instruction::show_players([a]).unwrap()).unwrap();

		assert!(!client.hidden_players.contains(&a));
		assert!(client.hidden_players.contains(&b));
	}

	#[test]
	fn machines_cover_every_instruction() {
		let client = Rc::new(RefCell::new(HeadlessClient::with_clock(ManualClock::new(0))));
		let mut registry = MachineRegistry::new();
		register_machines(&mut registry, &client);

		assert_eq!(registry.len(), InstructionId::ALL.len());

		let rect = Instruction::draw_rect_colored(0, 0, 8, 8, Color::RED, 50).unwrap();
		registry
			.get_mut(InstructionId::DrawShape)
			.unwrap()
			.on_instruction(&rect)
			.unwrap();
		assert!(client.borrow().hud.contains_key(&rect));
	}
}
