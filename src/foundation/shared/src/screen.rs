use std::{fmt, str::FromStr};

use crate::{
	param::{ParameterList, Parameterized},
	params,
	render::{DrawingContext, PlainText, Text},
	time::IntoMillis,
	validate::{positive, ArgumentError},
};

// === DefaultScreen === //

/// A built-in screen that can be opened by name.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum DefaultScreen {
	Title,
	Pause,
	Options,
	ShareToLan,
	Advancements,
	Stats,
}

impl DefaultScreen {
	pub const ALL: [Self; 6] = [
		Self::Title,
		Self::Pause,
		Self::Options,
		Self::ShareToLan,
		Self::Advancements,
		Self::Stats,
	];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Pause => "pause",
			Self::Options => "options",
			Self::ShareToLan => "share_to_lan",
			Self::Advancements => "advancements",
			Self::Stats => "stats",
		}
	}
}

impl fmt::Display for DefaultScreen {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for DefaultScreen {
	type Err = ArgumentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|screen| screen.name() == s)
			.ok_or(ArgumentError::invalid("screen", "is not a default screen"))
	}
}

// === Overlay === //

/// A drawing context shown on top of the game, optionally only while it is paused.
///
/// The overlay always owns a frozen context, so edits made to a builder after the overlay was
/// created never reach it.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Overlay {
	context: DrawingContext,
	pause_screen: bool,
}

impl Overlay {
	pub fn new(context: impl Into<DrawingContext>, pause_screen: bool) -> Self {
		Self {
			context: context.into(),
			pause_screen,
		}
	}

	pub fn context(&self) -> &DrawingContext {
		&self.context
	}

	pub fn is_pause_screen(&self) -> bool {
		self.pause_screen
	}

	pub fn with_pause_screen(mut self, pause_screen: bool) -> Self {
		self.pause_screen = pause_screen;
		self
	}
}

// === Toast === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ToastKind {
	Custom = 0,
	System = 1,
	Tutorial = 2,
}

impl ToastKind {
	pub fn from_raw(raw: u8) -> Option<Self> {
		[Self::Custom, Self::System, Self::Tutorial]
			.get(usize::from(raw))
			.copied()
	}
}

macro_rules! named_enum {
	($(#[$attr:meta])* $name:ident { $($variant:ident => $text:literal),*$(,)? }) => {
		$(#[$attr])*
		#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
		pub enum $name {
			$($variant),*
		}

		impl $name {
			pub const ALL: &'static [Self] = &[$(Self::$variant),*];

			pub const fn name(self) -> &'static str {
				match self {
					$(Self::$variant => $text),*
				}
			}

			pub fn from_name(name: &str) -> Option<Self> {
				Self::ALL.iter().copied().find(|value| value.name() == name)
			}
		}
	};
}

named_enum!(
	/// The vanilla notification toasts.
	SystemToast {
		NarratorToggle => "narrator_toggle",
		WorldBackup => "world_backup",
		PackLoadFailure => "pack_load_failure",
		WorldAccessFailure => "world_access_failure",
		PackCopyFailure => "pack_copy_failure",
		FileDropFailure => "file_drop_failure",
		PeriodicNotification => "periodic_notification",
		LowDiskSpace => "low_disk_space",
		ChunkLoadFailure => "chunk_load_failure",
		ChunkSaveFailure => "chunk_save_failure",
		UnsecureServerWarning => "unsecure_server_warning",
	}
);

named_enum!(
	/// The icons a tutorial toast can show.
	TutorialToast {
		MovementKeys => "movement_keys",
		Mouse => "mouse",
		Tree => "tree",
		RecipeBook => "recipe_book",
		WoodenPlanks => "wooden_planks",
		SocialInteractions => "social_interactions",
		RightClick => "right_click",
	}
);

/// A popup in the top-right corner of the screen.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Toast {
	kind: ToastKind,
	width: i32,
	height: i32,
	parameters: ParameterList,
	duration: i64,
}

impl Toast {
	pub const DEFAULT_WIDTH: i32 = 160;
	pub const DEFAULT_HEIGHT: i32 = 32;

	/// Vanilla toasts pick their own display time.
	pub const VANILLA_DURATION: i64 = -1;

	pub fn custom(context: impl Into<DrawingContext>, duration: impl IntoMillis) -> Result<Self, ArgumentError> {
		Self::custom_sized(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT, context, duration)
	}

	pub fn custom_sized(
		width: i32,
		height: i32,
		context: impl Into<DrawingContext>,
		duration: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		positive("width", width)?;
		positive("height", height)?;
		let duration = positive("duration", duration.into_millis())?;

		Ok(Self::from_parts(
			ToastKind::Custom,
			width,
			height,
			params![context.into()],
			duration,
		))
	}

	pub fn system(kind: SystemToast, title: &impl Text) -> Self {
		Self::system_with_message(kind, title, &PlainText::empty())
	}

	pub fn system_with_message(kind: SystemToast, title: &impl Text, message: &impl Text) -> Self {
		Self::from_parts(
			ToastKind::System,
			Self::DEFAULT_WIDTH,
			Self::DEFAULT_HEIGHT,
			params![kind.name(), title.to_json(), message.to_json()],
			Self::VANILLA_DURATION,
		)
	}

	pub fn tutorial(
		kind: TutorialToast,
		title: &impl Text,
		message: &impl Text,
		progressable: bool,
	) -> Self {
		Self::from_parts(
			ToastKind::Tutorial,
			Self::DEFAULT_WIDTH,
			Self::DEFAULT_HEIGHT,
			params![kind.name(), title.to_json(), message.to_json(), progressable],
			Self::VANILLA_DURATION,
		)
	}

	/// Reassembles a toast from its wire parts without re-validating them.
	pub fn from_parts(
		kind: ToastKind,
		width: i32,
		height: i32,
		parameters: ParameterList,
		duration: i64,
	) -> Self {
		Self {
			kind,
			width,
			height,
			parameters,
			duration,
		}
	}

	pub fn kind(&self) -> ToastKind {
		self.kind
	}

	pub fn width(&self) -> i32 {
		self.width
	}

	pub fn height(&self) -> i32 {
		self.height
	}

	pub fn duration(&self) -> i64 {
		self.duration
	}
}

impl Parameterized for Toast {
	fn parameters(&self) -> &ParameterList {
		&self.parameters
	}
}
