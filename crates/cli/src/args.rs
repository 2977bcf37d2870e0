//! Parsers for the positional/option values that structopt can't handle on
//! its own.

use anyhow::{anyhow, bail, Context};
use hexmove::{HexPoint, Point3, UnitId};
use std::str::FromStr;

/// A cell, given as `Q,R`
#[derive(Copy, Clone, Debug)]
pub struct CellArg(pub HexPoint);

impl FromStr for CellArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let [q, r] = parse_components::<i32, 2>(s)?;
        Ok(Self(HexPoint::new(q, r)))
    }
}

/// A world position, given as `X,Y,Z`
#[derive(Copy, Clone, Debug)]
pub struct PositionArg(pub Point3<f64>);

impl FromStr for PositionArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let [x, y, z] = parse_components::<f64, 3>(s)?;
        Ok(Self(Point3::new(x, y, z)))
    }
}

/// A single pick to replay against the board
#[derive(Copy, Clone, Debug)]
pub enum PickArg {
    /// `cell:Q,R`
    Cell(HexPoint),
    /// `unit:ID` or `unit:ID@X,Y,Z`. Without an explicit position, the unit
    /// is picked wherever the board last put it.
    Unit {
        unit: UnitId,
        world_position: Option<Point3<f64>>,
    },
}

impl FromStr for PickArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (kind, value) = s.split_once(':').ok_or_else(|| {
            anyhow!("expected cell:Q,R or unit:ID[@X,Y,Z], got {:?}", s)
        })?;
        match kind {
            "cell" => Ok(Self::Cell(value.parse::<CellArg>()?.0)),
            "unit" => {
                let (id, position) = match value.split_once('@') {
                    Some((id, position)) => {
                        (id, Some(position.parse::<PositionArg>()?.0))
                    }
                    None => (value, None),
                };
                let id: u32 = id
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid unit ID {:?}", id))?;
                Ok(Self::Unit {
                    unit: UnitId(id),
                    world_position: position,
                })
            }
            other => bail!("unknown pick kind {:?}", other),
        }
    }
}

/// Parse exactly `N` comma-separated values
fn parse_components<T, const N: usize>(s: &str) -> anyhow::Result<[T; N]>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let values = s
        .split(',')
        .map(|component| {
            component
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid component {:?}", component))
        })
        .collect::<anyhow::Result<Vec<T>>>()?;
    let len = values.len();
    values
        .try_into()
        .map_err(|_| anyhow!("expected {} components in {:?}, got {}", N, s, len))
}
