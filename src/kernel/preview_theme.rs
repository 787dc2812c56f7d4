//! Presentation-only stylesheet injected into sandbox snapshots.

use crate::kernel::services::ports::Theme;

/// Reserved path of the generated stylesheet inside a snapshot.
pub const STYLESHEET_PATH: &str = "cipherstudio-theme.css";
/// Entry module that gets the stylesheet import prepended.
pub const ENTRY_PATH: &str = "index.js";
pub const STYLESHEET_IMPORT: &str = "import './cipherstudio-theme.css';\n";

struct Palette {
    bg: &'static str,
    panel_bg: &'static str,
    toolbar_bg: &'static str,
    text: &'static str,
    muted: &'static str,
    border: &'static str,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: "#0b1220",
            panel_bg: "#0f1722",
            toolbar_bg: "#0b1220",
            text: "#e6edf3",
            muted: "#9ca3af",
            border: "#1f2937",
        },
        Theme::Light => Palette {
            bg: "#ffffff",
            panel_bg: "#ffffff",
            toolbar_bg: "#f3f4f6",
            text: "#111827",
            muted: "#6b7280",
            border: "#e5e7eb",
        },
    }
}

pub fn stylesheet(theme: Theme) -> String {
    let Palette {
        bg,
        panel_bg,
        toolbar_bg,
        text,
        muted,
        border,
    } = palette(theme);

    format!(
        "html,body{{height:100%;margin:0;background:{bg} !important;color:{text} !important;\
font-family:Inter,system-ui,-apple-system,'Segoe UI',Roboto,Arial !important}}\n\
body > * {{ background:{panel_bg} !important; color:{text} !important }}\n\
.sp-preview .sp-actions, .sp-preview .sp-toolbar {{ background:{toolbar_bg} !important; \
border-top:1px solid {border} !important }}\n\
.sp-preview .sp-actions button, .sp-preview .sp-toolbar button {{ background:transparent !important; \
color:{muted} !important; border:none !important; border-radius:999px !important }}\n\
.sp-tabs {{ background:{toolbar_bg} !important; border-bottom:1px solid {border} !important }}\n\
.sp-tab {{ color:{muted} !important }}\n\
.sp-tab-active {{ color:{text} !important; font-weight:600 !important }}\n\
.sp-preview, .sp-preview iframe {{ overflow:auto !important }}\n\
pre, code {{ color:inherit !important; font-family:ui-monospace,SFMono-Regular,Menlo,monospace !important }}\n"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/preview_theme.rs"]
mod tests;
