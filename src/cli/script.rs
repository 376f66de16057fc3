//! Pointer gesture scripts for the `edit` command
//!
//! A script is a list of steps separated by `;` or newlines, each a verb and
//! a display-space point: `down 10,10; drag 120,80; up 120,80; hover 50,50`.

use crate::domain::errors::DomainError;
use crate::domain::model::{DisplayPoint, PointerEvent, MAX_DISPLAY_COORD};

/// Parse a whole gesture script
pub fn parse_gestures(script: &str) -> Result<Vec<PointerEvent>, DomainError> {
    script
        .split(|c| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(step: &str) -> Result<PointerEvent, DomainError> {
    let (verb, point) = step
        .split_once(char::is_whitespace)
        .ok_or_else(|| DomainError::BadArgs(format!("Gesture step needs a point: '{}'", step)))?;
    let point = parse_point(point.trim())?;

    match verb.to_lowercase().as_str() {
        "down" | "press" => Ok(PointerEvent::Press(point)),
        "drag" | "move" => Ok(PointerEvent::Drag(point)),
        "up" | "release" => Ok(PointerEvent::Release(point)),
        "hover" => Ok(PointerEvent::Hover(point)),
        other => Err(DomainError::BadArgs(format!(
            "Unknown gesture '{}'. Valid gestures: down, drag, up, hover",
            other
        ))),
    }
}

fn parse_point(point: &str) -> Result<DisplayPoint, DomainError> {
    let invalid = || DomainError::BadArgs(format!("Invalid point '{}', expected X,Y", point));
    let (x, y) = point.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    if x.unsigned_abs() > MAX_DISPLAY_COORD as u32 || y.unsigned_abs() > MAX_DISPLAY_COORD as u32 {
        return Err(DomainError::BadArgs(format!(
            "Point '{}' is outside +/-{}",
            point, MAX_DISPLAY_COORD
        )));
    }
    Ok(DisplayPoint::new(x, y))
}
