use std::str::FromStr;

use crate::validate::ArgumentError;

// === Native dialogs === //

/// The icon shown by an operating-system dialog.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub enum WindowIcon {
	#[default]
	Ok,
	Warning,
	Error,
	Question,
}

impl WindowIcon {
	pub const ALL: [Self; 4] = [Self::Ok, Self::Warning, Self::Error, Self::Question];

	/// The name native dialog libraries use for this icon.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Ok => "info",
			Self::Warning => "warning",
			Self::Error => "error",
			Self::Question => "question",
		}
	}
}

impl FromStr for WindowIcon {
	type Err = ArgumentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|icon| icon.name() == s)
			.ok_or(ArgumentError::invalid("icon", "is not a window icon"))
	}
}

/// The button layout of an operating-system message box.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub enum WindowDialogue {
	#[default]
	Ok,
	OkCancel,
	YesNo,
	YesNoCancel,
}

impl WindowDialogue {
	pub const ALL: [Self; 4] = [Self::Ok, Self::OkCancel, Self::YesNo, Self::YesNoCancel];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Ok => "ok",
			Self::OkCancel => "okcancel",
			Self::YesNo => "yesno",
			Self::YesNoCancel => "yesnocancel",
		}
	}

	pub const fn has_cancel(self) -> bool {
		matches!(self, Self::OkCancel | Self::YesNoCancel)
	}
}

impl FromStr for WindowDialogue {
	type Err = ArgumentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|dialogue| dialogue.name() == s)
			.ok_or(ArgumentError::invalid("dialogue", "is not a dialogue layout"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_parse_back() {
		for icon in WindowIcon::ALL {
			assert_eq!(icon.name().parse::<WindowIcon>(), Ok(icon));
		}
		for dialogue in WindowDialogue::ALL {
			assert_eq!(dialogue.name().parse::<WindowDialogue>(), Ok(dialogue));
		}
		assert!("maybe".parse::<WindowDialogue>().is_err());
	}
}
