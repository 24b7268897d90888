mod factory;
mod renderer;

pub use factory::*;
pub use renderer::*;

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
	param::{ParameterList, Parameterized},
	permission::ModPermission,
};

// === InstructionId === //

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown instruction id {0:?}")]
pub struct UnknownInstructionError(pub String);

macro_rules! instruction_ids {
	($($variant:ident => $name:literal, $perm:ident;)*) => {
		/// The closed set of operations a server can ask a client to perform.
		#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
		pub enum InstructionId {
			$($variant),*
		}

		impl InstructionId {
			pub const ALL: &'static [Self] = &[$(Self::$variant),*];

			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $name),*
				}
			}

			pub const fn permission(self) -> ModPermission {
				match self {
					$(Self::$variant => ModPermission::$perm),*
				}
			}
		}
	};
}

instruction_ids! {
	Ping => "ping", Required;
	DrawText => "draw_text", UseGui;
	DrawShape => "draw_shape", UseGui;
	PlayAudio => "play_audio", UseAudio;
	DrawBuffer => "draw_buffer", UseGui;
	LogMessage => "log_message", Required;
	DrawTexture => "draw_texture", UseGui;
	OpenBookAndQuill => "open_book_and_quill", UseScreens;
	OpenScreen => "open_screen", UseScreens;
	CloseScreen => "close_screen", UseScreens;
	Renderer => "renderer", UseGui;
	DrawBeaconBeam => "draw_beacon_beam", UseGui;
	OpenLink => "open_link", OpenLinks;
	Mailto => "mailto", ExternalApplications;
	DrawContext => "draw_context", UseGui;
	DisplayToast => "display_toast", UseGui;
	SetOverlay => "set_overlay", UseGui;
	DrawItemStack => "draw_itemstack", UseGui;
	SetWindowIcon => "set_window_icon", UseGui;
	SetWindowTitle => "set_window_title", UseGui;
	ShowPlayers => "show_players", UseGui;
	HidePlayers => "hide_players", UseGui;
	Narrate => "narrate", UseAudio;
	OsBeep => "os_beep", UseAudio;
	ExternalWindowPopup => "external_window_popup", ExternalApplications;
	ExternalWindowMessageBox => "external_window_message_box", ExternalApplications;
}

impl fmt::Display for InstructionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for InstructionId {
	type Err = UnknownInstructionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.iter()
			.copied()
			.find(|id| id.as_str() == s)
			.ok_or_else(|| UnknownInstructionError(s.to_string()))
	}
}

// === Instruction === //

/// An operation descriptor sent from a server plugin to the client.
///
/// Instructions are only built through the validating factories (or by decoding) and never
/// change afterwards.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Instruction {
	id: InstructionId,
	parameters: ParameterList,
}

impl Instruction {
	/// Reassembles an instruction from its wire parts without re-validating them.
	pub fn from_parts(id: InstructionId, parameters: ParameterList) -> Self {
		Self { id, parameters }
	}

	pub fn id(&self) -> &'static str {
		self.id.as_str()
	}

	pub fn kind(&self) -> InstructionId {
		self.id
	}

	pub fn permission(&self) -> ModPermission {
		self.id.permission()
	}

	pub fn into_parts(self) -> (InstructionId, ParameterList) {
		(self.id, self.parameters)
	}

	/// Every registered instruction id.
	pub fn ids() -> impl ExactSizeIterator<Item = &'static str> {
		InstructionId::ALL.iter().map(|id| id.as_str())
	}

	/// Looks up the permission guarding an instruction id.
	///
	/// An unknown id is a registration bug on the caller's side and must not be defaulted.
	pub fn permission_of(id: &str) -> Result<ModPermission, UnknownInstructionError> {
		id.parse::<InstructionId>().map(InstructionId::permission)
	}
}

impl Parameterized for Instruction {
	fn parameters(&self) -> &ParameterList {
		&self.parameters
	}
}

impl fmt::Display for Instruction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Instruction({:?}) {{{} parameter(s)}}", self.id(), self.parameters.len())
	}
}
