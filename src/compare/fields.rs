use crate::report::{field, ReportData};

/// A named rule extracting one display value from a report's data.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub extract: fn(&ReportData) -> String,
}

macro_rules! plain_field {
    ($fn_name:ident, $key:literal) => {
        fn $fn_name(data: &ReportData) -> String {
            field(data, $key)
        }
    };
}

plain_field!(steamos_version, "steamos_version");
plain_field!(proton_version, "proton_version");
plain_field!(launch_options, "launch_options");
plain_field!(allow_tearing, "allow_tearing");
plain_field!(half_rate_shading, "half_rate_shading");
plain_field!(scaling_mode, "scaling_mode");
plain_field!(scaling_filter, "scaling_filter");
plain_field!(game_resolution, "game_resolution");
plain_field!(game_display_mode, "game_display_mode");
plain_field!(graphics_preset, "graphics_preset");
plain_field!(anti_aliasing, "anti_aliasing");
plain_field!(vsync, "vsync");

pub const DEVICE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        id: "steamos_version",
        label: "SteamOS Version",
        extract: steamos_version,
    },
    FieldDescriptor {
        id: "proton_version",
        label: "Proton Version",
        extract: proton_version,
    },
    FieldDescriptor {
        id: "launch_options",
        label: "Launch Options",
        extract: launch_options,
    },
];

pub const STEAMOS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        id: "framerate",
        label: "Framerate",
        extract: framerate,
    },
    FieldDescriptor {
        id: "allow_tearing",
        label: "Allow Tearing",
        extract: allow_tearing,
    },
    FieldDescriptor {
        id: "half_rate_shading",
        label: "Half Rate Shading",
        extract: half_rate_shading,
    },
    FieldDescriptor {
        id: "tdp_limit",
        label: "TDP Limit",
        extract: tdp_limit,
    },
    FieldDescriptor {
        id: "gpu_clock",
        label: "Manual GPU Clock",
        extract: gpu_clock,
    },
    FieldDescriptor {
        id: "scaling_mode",
        label: "Scaling Mode",
        extract: scaling_mode,
    },
    FieldDescriptor {
        id: "scaling_filter",
        label: "Scaling Filter",
        extract: scaling_filter,
    },
];

pub const GAME_DISPLAY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        id: "game_resolution",
        label: "Resolution",
        extract: game_resolution,
    },
    FieldDescriptor {
        id: "game_display_mode",
        label: "Display Mode",
        extract: game_display_mode,
    },
    FieldDescriptor {
        id: "upscaling",
        label: "Upscaling",
        extract: upscaling,
    },
    FieldDescriptor {
        id: "graphics_preset",
        label: "Graphics Preset",
        extract: graphics_preset,
    },
    FieldDescriptor {
        id: "anti_aliasing",
        label: "Anti-Aliasing",
        extract: anti_aliasing,
    },
    FieldDescriptor {
        id: "vsync",
        label: "VSync",
        extract: vsync,
    },
];

pub const PERFORMANCE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        id: "average_framerate",
        label: "Average Framerate",
        extract: average_framerate,
    },
    FieldDescriptor {
        id: "battery_drain",
        label: "Battery Drain",
        extract: battery_drain,
    },
    FieldDescriptor {
        id: "battery_life",
        label: "Battery Life",
        extract: battery_life,
    },
];

/// Refresh rate is only meaningful when the frame limiter is disabled.
fn framerate(data: &ReportData) -> String {
    let limiter_disabled = field(data, "disable_frame_limit").eq_ignore_ascii_case("on");
    let refresh_rate = field(data, "refresh_rate");
    if limiter_disabled && !refresh_rate.is_empty() {
        return format!("Refresh Rate: {refresh_rate}Hz");
    }
    let frame_limit = field(data, "frame_limit");
    if frame_limit.is_empty() {
        String::new()
    } else {
        format!("Frame Limit: {frame_limit}FPS")
    }
}

fn tdp_limit(data: &ReportData) -> String {
    with_suffix(field(data, "tdp_limit"), "W")
}

fn gpu_clock(data: &ReportData) -> String {
    with_suffix(field(data, "manual_gpu_clock"), "MHz")
}

fn upscaling(data: &ReportData) -> String {
    let upscaler = field(data, "upscaler");
    let quality = field(data, "upscaler_quality");
    match (upscaler.is_empty(), quality.is_empty()) {
        (false, false) => format!("{upscaler} ({quality})"),
        _ => upscaler,
    }
}

fn average_framerate(data: &ReportData) -> String {
    with_suffix(field(data, "average_framerate"), " FPS")
}

fn battery_drain(data: &ReportData) -> String {
    with_suffix(field(data, "battery_drain"), "W")
}

fn battery_life(data: &ReportData) -> String {
    let raw = field(data, "battery_life_minutes");
    match raw.parse::<u64>() {
        Ok(minutes) => format!("{}h {}m", minutes / 60, minutes % 60),
        Err(_) => raw,
    }
}

fn with_suffix(value: String, suffix: &str) -> String {
    if value.is_empty() {
        value
    } else {
        format!("{value}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        battery_life, framerate, upscaling, DEVICE_FIELDS, GAME_DISPLAY_FIELDS, PERFORMANCE_FIELDS,
        STEAMOS_FIELDS,
    };
    use crate::report::ReportData;

    fn data(value: serde_json::Value) -> ReportData {
        serde_json::from_value(value).expect("data should be an object")
    }

    #[test]
    fn framerate_uses_refresh_rate_when_limiter_disabled() {
        let d = data(json!({ "disable_frame_limit": "On", "refresh_rate": 60, "frame_limit": 40 }));
        assert_eq!(framerate(&d), "Refresh Rate: 60Hz");
    }

    #[test]
    fn framerate_falls_back_to_frame_limit() {
        let d = data(json!({
            "disable_frame_limit": "Off",
            "refresh_rate": 60,
            "frame_limit": 40
        }));
        assert_eq!(framerate(&d), "Frame Limit: 40FPS");

        let toggle_without_rate = data(json!({ "disable_frame_limit": "on", "frame_limit": 30 }));
        assert_eq!(framerate(&toggle_without_rate), "Frame Limit: 30FPS");

        assert_eq!(framerate(&data(json!({}))), "");
    }

    #[test]
    fn upscaling_appends_quality_when_present() {
        assert_eq!(
            upscaling(&data(json!({ "upscaler": "FSR 2", "upscaler_quality": "Quality" }))),
            "FSR 2 (Quality)"
        );
        assert_eq!(upscaling(&data(json!({ "upscaler": "XeSS" }))), "XeSS");
        assert_eq!(upscaling(&data(json!({ "upscaler_quality": "Balanced" }))), "");
    }

    #[test]
    fn battery_life_formats_minutes() {
        assert_eq!(battery_life(&data(json!({ "battery_life_minutes": 130 }))), "2h 10m");
        let text = data(json!({ "battery_life_minutes": "about 2 hours" }));
        assert_eq!(battery_life(&text), "about 2 hours");
        assert_eq!(battery_life(&data(json!({}))), "");
    }

    #[test]
    fn suffixed_fields_stay_empty_when_missing() {
        let tdp = STEAMOS_FIELDS
            .iter()
            .find(|f| f.id == "tdp_limit")
            .expect("tdp descriptor");
        assert_eq!((tdp.extract)(&data(json!({}))), "");
        assert_eq!((tdp.extract)(&data(json!({ "tdp_limit": 12 }))), "12W");
    }

    #[test]
    fn descriptor_ids_are_unique_per_section() {
        for table in [
            DEVICE_FIELDS,
            STEAMOS_FIELDS,
            GAME_DISPLAY_FIELDS,
            PERFORMANCE_FIELDS,
        ] {
            let mut ids: Vec<_> = table.iter().map(|f| f.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), table.len());
        }
    }
}
