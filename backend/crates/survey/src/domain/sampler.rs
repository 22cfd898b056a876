//! Constrained Point Sampler
//!
//! Rejection sampling of uniform points inside the city polygon, optionally
//! restricted to a narrower axis-aligned box.

use std::fmt;
use std::str::FromStr;

use geo::{Area, BoundingRect, Contains, Polygon};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::value_objects::Point;
use crate::error::{SurveyError, SurveyResult};

/// Axis-aligned box, edges inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Apply an override edge by edge. Only edges that shrink the box are taken.
    pub fn narrowed_by(&self, bounds: &BoundsOverride) -> Extent {
        let raise = |natural: f64, over: Option<f64>| match over {
            Some(v) if v > natural => v,
            _ => natural,
        };
        let lower = |natural: f64, over: Option<f64>| match over {
            Some(v) if v < natural => v,
            _ => natural,
        };

        Extent {
            min_x: raise(self.min_x, bounds.min_x),
            max_x: lower(self.max_x, bounds.max_x),
            min_y: raise(self.min_y, bounds.min_y),
            max_y: lower(self.max_y, bounds.max_y),
        }
    }

    pub fn contains(&self, p: &Point) -> bool {
        (self.min_x..=self.max_x).contains(&p.lon) && (self.min_y..=self.max_y).contains(&p.lat)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Caller-supplied sub-bounds. `None` keeps the polygon's natural edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundsOverride {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

/// The city polygon, loaded once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct CityBoundary {
    polygon: Polygon<f64>,
    extent: Extent,
}

impl CityBoundary {
    pub fn new(polygon: Polygon<f64>) -> SurveyResult<Self> {
        let rect = polygon
            .bounding_rect()
            .ok_or_else(|| SurveyError::InvalidBoundary("polygon has no vertices".into()))?;

        if !(polygon.unsigned_area() > 0.0) {
            return Err(SurveyError::InvalidBoundary("polygon has zero area".into()));
        }

        let extent = Extent {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        };

        Ok(Self { polygon, extent })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Strict containment: points on the boundary ring are outside.
    pub fn contains(&self, p: &Point) -> bool {
        self.polygon.contains(&geo::Point::from(*p))
    }
}

/// Draw one uniform point inside `boundary`, within `bounds` if given.
///
/// Retries until a draw lands inside the polygon. An override that excludes
/// the whole polygon never returns.
pub fn sample<R>(boundary: &CityBoundary, bounds: Option<&BoundsOverride>, rng: &mut R) -> Point
where
    R: Rng + ?Sized,
{
    let extent = match bounds {
        Some(b) => boundary.extent().narrowed_by(b),
        None => boundary.extent(),
    };

    loop {
        let candidate = Point::new(
            uniform(rng, extent.min_x, extent.max_x),
            uniform(rng, extent.min_y, extent.max_y),
        );
        if boundary.contains(&candidate) {
            return candidate;
        }
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + (high - low) * rng.random::<f64>()
}

/// Named part of the city, split at the centre of its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Anywhere,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Region {
    pub fn bounds_for(&self, boundary: &CityBoundary) -> Option<BoundsOverride> {
        let c = boundary.extent().center();
        let north = Some(c.lat);
        let east = Some(c.lon);

        let bounds = match self {
            Region::Anywhere => return None,
            Region::North => BoundsOverride {
                min_y: north,
                ..Default::default()
            },
            Region::South => BoundsOverride {
                max_y: north,
                ..Default::default()
            },
            Region::East => BoundsOverride {
                min_x: east,
                ..Default::default()
            },
            Region::West => BoundsOverride {
                max_x: east,
                ..Default::default()
            },
            Region::NorthEast => BoundsOverride {
                min_x: east,
                min_y: north,
                ..Default::default()
            },
            Region::NorthWest => BoundsOverride {
                max_x: east,
                min_y: north,
                ..Default::default()
            },
            Region::SouthEast => BoundsOverride {
                min_x: east,
                max_y: north,
                ..Default::default()
            },
            Region::SouthWest => BoundsOverride {
                max_x: east,
                max_y: north,
                ..Default::default()
            },
        };
        Some(bounds)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Region::Anywhere => "anywhere",
            Region::North => "north",
            Region::South => "south",
            Region::East => "east",
            Region::West => "west",
            Region::NorthEast => "northeast",
            Region::NorthWest => "northwest",
            Region::SouthEast => "southeast",
            Region::SouthWest => "southwest",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "anywhere" | "any" | "" => Ok(Region::Anywhere),
            "north" | "n" => Ok(Region::North),
            "south" | "s" => Ok(Region::South),
            "east" | "e" => Ok(Region::East),
            "west" | "w" => Ok(Region::West),
            "northeast" | "ne" => Ok(Region::NorthEast),
            "northwest" | "nw" => Ok(Region::NorthWest),
            "southeast" | "se" => Ok(Region::SouthEast),
            "southwest" | "sw" => Ok(Region::SouthWest),
            _ => Err(SurveyError::InvalidSamplingPlan(format!(
                "unknown region '{}'",
                s.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRule {
    pub count: usize,
    pub region: Region,
}

/// How many points each session gets, and from where
///
/// Text form: `"2:south,3:northeast"`. A bare count means `anywhere`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingPlan {
    rules: Vec<DrawRule>,
}

impl SamplingPlan {
    pub fn new(rules: Vec<DrawRule>) -> SurveyResult<Self> {
        let plan = Self { rules };
        if plan.total_points() == 0 {
            return Err(SurveyError::InvalidSamplingPlan(
                "plan draws no points".into(),
            ));
        }
        Ok(plan)
    }

    pub fn rules(&self) -> &[DrawRule] {
        &self.rules
    }

    pub fn total_points(&self) -> usize {
        self.rules.iter().map(|r| r.count).sum()
    }

    /// Draw every rule in order, then shuffle the combined batch.
    pub fn draw<R>(&self, boundary: &CityBoundary, rng: &mut R) -> Vec<Point>
    where
        R: Rng + ?Sized,
    {
        let mut points = Vec::with_capacity(self.total_points());
        for rule in &self.rules {
            let bounds = rule.region.bounds_for(boundary);
            for _ in 0..rule.count {
                points.push(sample(boundary, bounds.as_ref(), rng));
            }
        }
        points.shuffle(rng);
        points
    }
}

impl Default for SamplingPlan {
    fn default() -> Self {
        Self {
            rules: vec![DrawRule {
                count: 5,
                region: Region::Anywhere,
            }],
        }
    }
}

impl fmt::Display for SamplingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .rules
            .iter()
            .map(|r| format!("{}:{}", r.count, r.region))
            .collect();
        f.write_str(&parts.join(","))
    }
}

impl FromStr for SamplingPlan {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rules = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (count, region) = part.split_once(':').unwrap_or((part, "anywhere"));
                let count = count.trim().parse::<usize>().map_err(|e| {
                    SurveyError::InvalidSamplingPlan(format!("bad count in '{}': {}", part, e))
                })?;
                Ok(DrawRule {
                    count,
                    region: region.parse()?,
                })
            })
            .collect::<SurveyResult<Vec<_>>>()?;

        Self::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn triangle() -> CityBoundary {
        let ring = LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        CityBoundary::new(Polygon::new(ring, vec![])).unwrap()
    }

    #[test]
    fn test_extent_of_boundary() {
        let extent = triangle().extent();
        assert_eq!(extent.min_x, 0.0);
        assert_eq!(extent.max_x, 10.0);
        assert_eq!(extent.min_y, 0.0);
        assert_eq!(extent.max_y, 10.0);
        assert_eq!(extent.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_degenerate_polygon_rejected() {
        let empty = Polygon::new(LineString::<f64>::new(vec![]), vec![]);
        assert!(matches!(
            CityBoundary::new(empty),
            Err(SurveyError::InvalidBoundary(_))
        ));

        let flat = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (0.0, 0.0)]),
            vec![],
        );
        assert!(matches!(
            CityBoundary::new(flat),
            Err(SurveyError::InvalidBoundary(_))
        ));
    }

    #[test]
    fn test_override_narrows_only() {
        let natural = triangle().extent();
        let narrowed = natural.narrowed_by(&BoundsOverride {
            min_x: Some(2.0),
            max_x: Some(20.0),
            min_y: Some(-5.0),
            max_y: Some(4.0),
        });

        assert_eq!(narrowed.min_x, 2.0);
        assert_eq!(narrowed.max_x, 10.0);
        assert_eq!(narrowed.min_y, 0.0);
        assert_eq!(narrowed.max_y, 4.0);
    }

    #[test]
    fn test_nan_override_ignored() {
        let natural = triangle().extent();
        let narrowed = natural.narrowed_by(&BoundsOverride {
            min_x: Some(f64::NAN),
            ..Default::default()
        });
        assert_eq!(narrowed, natural);
    }

    #[test]
    fn test_sample_contained() {
        let boundary = triangle();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = sample(&boundary, None, &mut rng);
            assert!(boundary.contains(&p), "{:?} outside polygon", p);
        }
    }

    #[test]
    fn test_sample_respects_narrowing_edge() {
        let boundary = triangle();
        let bounds = BoundsOverride {
            max_y: Some(2.5),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let p = sample(&boundary, Some(&bounds), &mut rng);
            assert!(boundary.contains(&p));
            assert!(p.lat <= 2.5, "{:?} above override", p);
        }
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("NE".parse::<Region>().unwrap(), Region::NorthEast);
        assert_eq!("north-west".parse::<Region>().unwrap(), Region::NorthWest);
        assert_eq!("South_East".parse::<Region>().unwrap(), Region::SouthEast);
        assert_eq!(" anywhere ".parse::<Region>().unwrap(), Region::Anywhere);
        assert!("up".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_bounds() {
        let boundary = triangle();
        assert!(Region::Anywhere.bounds_for(&boundary).is_none());

        let ne = Region::NorthEast.bounds_for(&boundary).unwrap();
        assert_eq!(ne.min_x, Some(5.0));
        assert_eq!(ne.min_y, Some(5.0));
        assert_eq!(ne.max_x, None);
        assert_eq!(ne.max_y, None);
    }

    #[test]
    fn test_plan_parsing() {
        let plan: SamplingPlan = "2:south, 3:northeast".parse().unwrap();
        assert_eq!(plan.total_points(), 5);
        assert_eq!(
            plan.rules(),
            &[
                DrawRule {
                    count: 2,
                    region: Region::South
                },
                DrawRule {
                    count: 3,
                    region: Region::NorthEast
                },
            ]
        );
        assert_eq!(plan.to_string(), "2:south,3:northeast");

        let bare: SamplingPlan = "4".parse().unwrap();
        assert_eq!(bare.rules()[0].region, Region::Anywhere);
    }

    #[test]
    fn test_plan_parsing_errors() {
        assert!("x:north".parse::<SamplingPlan>().is_err());
        assert!("2:up".parse::<SamplingPlan>().is_err());
        assert!("".parse::<SamplingPlan>().is_err());
        assert!("0:north".parse::<SamplingPlan>().is_err());
    }

    #[test]
    fn test_default_plan() {
        let plan = SamplingPlan::default();
        assert_eq!(plan.total_points(), 5);
        assert_eq!(plan.to_string(), "5:anywhere");
    }

    #[test]
    fn test_plan_draw_counts_and_regions() {
        let boundary = triangle();
        let plan: SamplingPlan = "3:south,2:west".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let points = plan.draw(&boundary, &mut rng);
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| boundary.contains(p)));

        // Triangle's south half and west half overlap; every point must be in one of them
        let south = boundary
            .extent()
            .narrowed_by(&Region::South.bounds_for(&boundary).unwrap());
        let west = boundary
            .extent()
            .narrowed_by(&Region::West.bounds_for(&boundary).unwrap());
        assert!(points.iter().all(|p| south.contains(p) || west.contains(p)));
        assert!(points.iter().filter(|p| south.contains(p)).count() >= 3);
    }
}
