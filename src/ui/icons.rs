//! Emoji used across the terminal UI, with plain-text fallbacks.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[S]");
pub static JUDGE: Emoji<'_, '_> = Emoji("⚖️  ", "[J]");
pub static RETRY: Emoji<'_, '_> = Emoji("🔄 ", "[R]");
pub static TROPHY: Emoji<'_, '_> = Emoji("🏆 ", "[WIN]");
pub static STOP: Emoji<'_, '_> = Emoji("🛑 ", "[STOP]");
pub static CLOCK: Emoji<'_, '_> = Emoji("⏱️  ", "[T]");
