//! Small formatting helpers shared by the configuration and display code.

use std::path::Path;

/// Render a path for logs with the home directory shown as `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}

/// Format coordinates as `40.713°N, 74.006°W`.
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let lat_dir = if latitude >= 0.0 { "N" } else { "S" };
    let lon_dir = if longitude >= 0.0 { "E" } else { "W" };
    format!(
        "{:.3}°{lat_dir}, {:.3}°{lon_dir}",
        latitude.abs(),
        longitude.abs()
    )
}

/// Format a signed duration in seconds as `+2m 52s` or `-3m 27s`.
pub fn format_signed_minutes(seconds: f64) -> String {
    let sign = if seconds < 0.0 { '-' } else { '+' };
    let total = seconds.abs().round() as u64;
    format!("{sign}{}m {:02}s", total / 60, total % 60)
}
