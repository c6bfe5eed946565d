//! Light and dark palettes, picked from the system preference at startup

use std::sync::OnceLock;

/// Cached system dark mode preference (detected once at startup)
static SYSTEM_DARK_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    #[must_use]
    pub fn from_system() -> Self {
        if *SYSTEM_DARK_MODE.get_or_init(detect_system_dark_mode) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub const fn attr(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

#[cfg(target_os = "windows")]
fn detect_system_dark_mode() -> bool {
    // AppsUseLightTheme: 0x0 means dark
    let output = std::process::Command::new("reg")
        .args([
            "query",
            r"HKCU\SOFTWARE\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output();
    match output {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains("0x0"),
        Err(error) => {
            tracing::warn!("Failed to detect system theme: {}", error);
            false
        }
    }
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode() -> bool {
    let output = std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output();
    match output {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .trim()
            .eq_ignore_ascii_case("dark"),
        Err(error) => {
            tracing::warn!("Failed to detect system theme: {}", error);
            false
        }
    }
}

#[cfg(target_os = "linux")]
fn detect_system_dark_mode() -> bool {
    std::env::var("GTK_THEME").is_ok_and(|theme| theme.to_lowercase().contains("dark"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn detect_system_dark_mode() -> bool {
    false
}

#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub map_water: &'static str,
    pub map_grid: &'static str,
    pub marker_start: &'static str,
    pub marker_pick: &'static str,
}

pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f4f6f8",
    text_primary: "#1c1f23",
    text_secondary: "#55606b",
    text_muted: "#98a1ab",
    border: "#d6dbe0",
    accent: "#0d6efd",
    accent_text: "#ffffff",
    error: "#dc3545",
    success: "#198754",
    map_water: "#cfe6f5",
    map_grid: "#9cc3dd",
    marker_start: "#0d6efd",
    marker_pick: "#fd7e14",
};

pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#16181b",
    bg_secondary: "#212429",
    text_primary: "#e6e8eb",
    text_secondary: "#a3acb5",
    text_muted: "#6b747d",
    border: "#3a3f45",
    accent: "#6ea8fe",
    accent_text: "#16181b",
    error: "#ea868f",
    success: "#75b798",
    map_water: "#1d3345",
    map_grid: "#2f5673",
    marker_start: "#6ea8fe",
    marker_pick: "#feb272",
};
