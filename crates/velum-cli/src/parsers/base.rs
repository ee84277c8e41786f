//! Base parsing functions for brush stamps and strokes.

/// A circular brush dab in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamp {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Stamp {
    /// The same dab on an image resized by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            radius: (self.radius * factor).max(0.5),
        }
    }
}

/// Parse a brush stamp in format "X,Y,R"
///
/// # Arguments
/// * `stamp_str` - A string in format "X,Y,R" with coordinates and radius in pixels
///
/// # Returns
/// The parsed [`Stamp`]
pub fn parse_stamp(stamp_str: &str) -> Result<Stamp, String> {
    let parts: Vec<&str> = stamp_str.split(',').collect();
    if parts.len() != 3 {
        return Err(format!(
            "Stamp must be in format X,Y,R (e.g., 120,80,40), got: {}",
            stamp_str
        ));
    }

    let x = parts[0]
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid x coordinate: {}", parts[0]))?;
    let y = parts[1]
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid y coordinate: {}", parts[1]))?;
    let radius = parts[2]
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid radius: {}", parts[2]))?;

    if !x.is_finite() || !y.is_finite() {
        return Err(format!("Stamp coordinates must be finite, got: {}", stamp_str));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(format!("Stamp radius {} must be positive", radius));
    }

    Ok(Stamp { x, y, radius })
}

/// A polyline brush stroke in source image pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<(f32, f32)>,
    pub radius: f32,
}

impl Stroke {
    /// The same stroke on an image resized by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|&(x, y)| (x * factor, y * factor))
                .collect(),
            radius: (self.radius * factor).max(0.5),
        }
    }
}

/// Parse a brush stroke in format "X,Y/X,Y/...:R"
///
/// Points are joined by `/` and the radius follows the final `:`.
pub fn parse_stroke(stroke_str: &str) -> Result<Stroke, String> {
    let (path, radius_str) = stroke_str.rsplit_once(':').ok_or_else(|| {
        format!(
            "Stroke must be in format X,Y/X,Y/...:R (e.g., 10,10/60,40:8), got: {}",
            stroke_str
        )
    })?;

    let radius = radius_str
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid radius: {}", radius_str))?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(format!("Stroke radius {} must be positive", radius));
    }

    let points = path
        .split('/')
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Stroke { points, radius })
}

fn parse_point(point_str: &str) -> Result<(f32, f32), String> {
    let (x_str, y_str) = point_str
        .split_once(',')
        .ok_or_else(|| format!("Stroke point must be X,Y, got: {}", point_str))?;
    let x = x_str
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid x coordinate: {}", x_str))?;
    let y = y_str
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid y coordinate: {}", y_str))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("Stroke coordinates must be finite, got: {}", point_str));
    }
    Ok((x, y))
}
