//! Feature vector types describing a single bathroom configuration.
//!
//! A [`Residence`] holds exactly one bathing [`Fixture`] plus any subset of
//! the seven [`Amenity`] flags. The flat boolean view ([`ResidenceFlags`]) is
//! what gets serialized; converting it back into a `Residence` checks that
//! exactly one fixture flag is set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mutually exclusive bathing fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fixture {
    #[default]
    Shower,
    Bath,
    BathAndShower,
}

impl Fixture {
    /// All fixtures, in the order used for uniform random choice.
    pub const ALL: [Fixture; 3] = [Fixture::Shower, Fixture::Bath, Fixture::BathAndShower];

    /// Comfort points contributed by the fixture alone.
    pub fn base_points(self) -> f32 {
        match self {
            Fixture::Shower => 4.0,
            Fixture::Bath => 6.0,
            Fixture::BathAndShower => 7.0,
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Fixture::Shower => "shower",
            Fixture::Bath => "bath",
            Fixture::BathAndShower => "bath & shower",
        }
    }
}

/// Independently togglable comfort feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Sink,
    DualSink,
    Curtain,
    Radiator,
    Closet,
    Wallsocket,
    Thermostatic,
}

impl Amenity {
    /// Number of amenity genes.
    pub const COUNT: usize = 7;

    /// All amenities, in gene order.
    pub const ALL: [Amenity; Amenity::COUNT] = [
        Amenity::Sink,
        Amenity::DualSink,
        Amenity::Curtain,
        Amenity::Radiator,
        Amenity::Closet,
        Amenity::Wallsocket,
        Amenity::Thermostatic,
    ];

    /// Comfort points added when present.
    pub fn points(self) -> f32 {
        match self {
            Amenity::Sink => 0.5,
            Amenity::DualSink => 1.0,
            Amenity::Curtain => 1.0,
            Amenity::Radiator => 1.5,
            Amenity::Closet => 2.0,
            Amenity::Wallsocket => 0.5,
            Amenity::Thermostatic => 1.0,
        }
    }

    /// Installation cost in currency units.
    pub fn cost(self) -> f32 {
        match self {
            Amenity::Sink => 50.0,
            Amenity::DualSink => 100.0,
            Amenity::Curtain => 50.0,
            Amenity::Radiator => 200.0,
            Amenity::Closet => 100.0,
            Amenity::Wallsocket => 25.0,
            Amenity::Thermostatic => 100.0,
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Amenity::Sink => "sink",
            Amenity::DualSink => "dual sink",
            Amenity::Curtain => "curtain",
            Amenity::Radiator => "radiator",
            Amenity::Closet => "closet",
            Amenity::Wallsocket => "wall socket",
            Amenity::Thermostatic => "thermostatic valve",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of amenities packed into a bitmask, one bit per [`Amenity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Amenities(u8);

impl Amenities {
    /// No amenities.
    pub const NONE: Amenities = Amenities(0);

    /// Every amenity.
    pub fn all() -> Self {
        Amenity::ALL
            .iter()
            .fold(Self::NONE, |acc, &a| acc.with(a, true))
    }

    /// Whether `amenity` is present.
    pub fn has(self, amenity: Amenity) -> bool {
        self.0 & amenity.bit() != 0
    }

    /// Copy with `amenity` set to `present`.
    pub fn with(self, amenity: Amenity, present: bool) -> Self {
        if present {
            Amenities(self.0 | amenity.bit())
        } else {
            Amenities(self.0 & !amenity.bit())
        }
    }

    /// Present amenities, in gene order.
    pub fn iter(self) -> impl Iterator<Item = Amenity> {
        Amenity::ALL.into_iter().filter(move |&a| self.has(a))
    }

    /// Number of present amenities.
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl FromIterator<Amenity> for Amenities {
    fn from_iter<I: IntoIterator<Item = Amenity>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::NONE, |acc, a| acc.with(a, true))
    }
}

/// One candidate bathroom configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ResidenceFlags", into = "ResidenceFlags")]
pub struct Residence {
    pub fixture: Fixture,
    pub amenities: Amenities,
}

impl Residence {
    pub fn new(fixture: Fixture, amenities: Amenities) -> Self {
        Self { fixture, amenities }
    }

    /// Whether `amenity` is present.
    pub fn has(&self, amenity: Amenity) -> bool {
        self.amenities.has(amenity)
    }

    /// Flat boolean view of the feature vector.
    pub fn flags(&self) -> ResidenceFlags {
        ResidenceFlags::from(*self)
    }
}

/// Flat boolean feature vector, as exchanged with the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResidenceFlags {
    pub shower: bool,
    pub bath: bool,
    pub bath_and_shower: bool,
    pub sink: bool,
    pub dual_sink: bool,
    pub curtain: bool,
    pub radiator: bool,
    pub closet: bool,
    pub wallsocket: bool,
    pub thermostatic: bool,
}

impl ResidenceFlags {
    /// Number of bathing fixture flags set. Valid residences have exactly one.
    pub fn fixture_count(&self) -> usize {
        [self.shower, self.bath, self.bath_and_shower]
            .iter()
            .filter(|&&f| f)
            .count()
    }
}

impl From<Residence> for ResidenceFlags {
    fn from(residence: Residence) -> Self {
        let a = residence.amenities;
        ResidenceFlags {
            shower: residence.fixture == Fixture::Shower,
            bath: residence.fixture == Fixture::Bath,
            bath_and_shower: residence.fixture == Fixture::BathAndShower,
            sink: a.has(Amenity::Sink),
            dual_sink: a.has(Amenity::DualSink),
            curtain: a.has(Amenity::Curtain),
            radiator: a.has(Amenity::Radiator),
            closet: a.has(Amenity::Closet),
            wallsocket: a.has(Amenity::Wallsocket),
            thermostatic: a.has(Amenity::Thermostatic),
        }
    }
}

impl TryFrom<ResidenceFlags> for Residence {
    type Error = InvariantError;

    fn try_from(flags: ResidenceFlags) -> Result<Self, Self::Error> {
        let fixture = match (flags.shower, flags.bath, flags.bath_and_shower) {
            (true, false, false) => Fixture::Shower,
            (false, true, false) => Fixture::Bath,
            (false, false, true) => Fixture::BathAndShower,
            _ => {
                return Err(InvariantError::FixtureCount {
                    count: flags.fixture_count(),
                });
            }
        };

        let amenities = Amenities::NONE
            .with(Amenity::Sink, flags.sink)
            .with(Amenity::DualSink, flags.dual_sink)
            .with(Amenity::Curtain, flags.curtain)
            .with(Amenity::Radiator, flags.radiator)
            .with(Amenity::Closet, flags.closet)
            .with(Amenity::Wallsocket, flags.wallsocket)
            .with(Amenity::Thermostatic, flags.thermostatic);

        Ok(Residence { fixture, amenities })
    }
}

/// Feature vector invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("Residence must have exactly one bathing fixture, found {count}")]
    FixtureCount { count: usize },
}

impl fmt::Display for Residence {
    /// One line per present feature with its point value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.fixture.label(),
            self.fixture.base_points()
        )?;
        for amenity in self.amenities.iter() {
            write!(f, ", \n{} ({:.1})", amenity.label(), amenity.points())?;
        }
        Ok(())
    }
}
