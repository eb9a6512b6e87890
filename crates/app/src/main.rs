//! Trackmesh inspector: decode an OBJ object and replay a trackball drag.

use anyhow::{Context, Result};
use asset::{ObjFile, ObjectData, ScanExtent};
use corelib::{OrbitCamera, PointerButton, Trackball, vec2};

fn arg_value(prefix: &str) -> Option<String> {
    std::env::args()
        .filter_map(|arg| arg.strip_prefix(prefix).map(str::to_owned))
        .last()
}

fn parse_obj_arg() -> Option<String> {
    arg_value("--obj=").filter(|p| !p.is_empty())
}

fn parse_object_arg() -> Option<String> {
    arg_value("--object=")
}

fn parse_scan_arg() -> ScanExtent {
    // --scan=eof|object, по умолчанию eof
    match arg_value("--scan=") {
        None => ScanExtent::ToEndOfFile,
        Some(val) => match val.to_ascii_lowercase().as_str() {
            "eof" | "end" => ScanExtent::ToEndOfFile,
            "object" | "next" => ScanExtent::ToNextObject,
            other => {
                log::warn!("Unknown scan extent '{}', falling back to eof.", other);
                ScanExtent::ToEndOfFile
            }
        },
    }
}

fn parse_size_args() -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in std::env::args() {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(800).max(1);
    let hh = h.unwrap_or(600).max(1);
    (ww, hh)
}

fn parse_speed_arg() -> f32 {
    match arg_value("--speed=") {
        None => Trackball::DEFAULT_SPEED,
        Some(val) => match val.parse::<f32>() {
            Ok(s) if s.is_finite() => s,
            _ => {
                log::warn!("Invalid speed '{}', using {}.", val, Trackball::DEFAULT_SPEED);
                Trackball::DEFAULT_SPEED
            }
        },
    }
}

/// --drag=X0,Y0,X1,Y1 in pixels; default is a quarter-width swipe right.
fn parse_drag_arg(width: u32, height: u32) -> [f32; 4] {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let default = [cx, cy, cx + width as f32 / 4.0, cy];

    let Some(val) = arg_value("--drag=") else {
        return default;
    };
    let parsed: Vec<f32> = val
        .split(',')
        .filter_map(|s| s.trim().parse::<f32>().ok())
        .collect();
    match parsed.as_slice() {
        &[x0, y0, x1, y1] => [x0, y0, x1, y1],
        _ => {
            log::warn!("Invalid drag '{}', expected X0,Y0,X1,Y1.", val);
            default
        }
    }
}

fn inspect_obj(path: &str, object: Option<String>, extent: ScanExtent) -> Result<ObjectData> {
    let mut file = ObjFile::open(path).with_context(|| format!("Failed to open {path}"))?;
    if !file.good() {
        log::warn!("'{}' was only partially indexed", path);
    }

    let mut names = file.list_objects();
    names.sort();
    log::info!("File '{}' contains {} object(s):", path, names.len());
    for name in &names {
        log::info!("   {}", name);
    }

    let name = match object {
        Some(name) => name,
        None => file
            .last_object()
            .map(str::to_owned)
            .context("OBJ file has no `o` objects")?,
    };
    log::info!("Decoding '{}' ({:?})", name, extent);

    let data = file
        .get_object_with(&name, extent)
        .with_context(|| format!("Failed to decode object '{name}'"))?;

    log::info!(
        "'{}': {} triangles, {} positions, {} normals, {} tex coords",
        name,
        data.triangle_count(),
        data.positions.len(),
        data.normals.len(),
        data.tex_coords.len()
    );
    if !data.is_renderable() {
        log::warn!(
            "'{}' attribute streams are not parallel; not usable as vertex arrays as-is",
            name
        );
    }
    Ok(data)
}

fn replay_drag(width: u32, height: u32, speed: f32, drag: [f32; 4]) -> OrbitCamera {
    let mut camera = OrbitCamera::new(width, height);
    camera.trackball.set_speed(speed);

    let [x0, y0, x1, y1] = drag;
    let steps = 16;
    camera.cursor_moved(vec2(x0, y0));
    camera.button(PointerButton::Rotate, true);
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        camera.cursor_moved(vec2(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
    }
    camera.button(PointerButton::Rotate, false);
    camera
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (width, height) = parse_size_args();
    let speed = parse_speed_arg();
    let drag = parse_drag_arg(width, height);
    log::info!(
        "Starting trackmesh inspector. viewport={}x{}, speed={}, drag={:?}",
        width,
        height,
        speed,
        drag
    );

    if let Some(path) = parse_obj_arg() {
        inspect_obj(&path, parse_object_arg(), parse_scan_arg())?;
    } else {
        log::info!("No --obj=PATH given; replaying trackball drag only.");
    }

    let camera = replay_drag(width, height, speed, drag);
    let (axis, angle) = camera.trackball.orientation().to_axis_angle();
    log::info!(
        "Orientation after drag: {:.2} deg about ({:.3}, {:.3}, {:.3})",
        angle.to_degrees(),
        axis.x,
        axis.y,
        axis.z
    );
    log::info!("View matrix: {:?}", camera.view().to_cols_array_2d());

    log::info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replayed_drag_leaves_trackball_idle_and_rotated() {
        let camera = replay_drag(800, 600, 2.0, [400.0, 300.0, 600.0, 300.0]);
        assert!(!camera.trackball.tracking());
        let (_, angle) = camera.trackball.orientation().to_axis_angle();
        assert!(angle > 0.1);
    }

    #[test]
    fn zero_length_drag_keeps_identity() {
        let camera = replay_drag(800, 600, 2.0, [100.0, 100.0, 100.0, 100.0]);
        assert_eq!(camera.trackball.orientation(), corelib::Quat::IDENTITY);
    }
}
