//! Network map text format.

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::models::{Network, NetworkError};

/// Errors raised while reading a network map.
#[derive(Error, Debug)]
pub enum MapError {
    /// The map file could not be read.
    #[error("cannot read network map: {0}")]
    Io(#[from] std::io::Error),
    /// A station line is not `name,x,y`.
    #[error("line {line}: malformed station definition `{content}`")]
    MalformedStation {
        /// 1-based line number.
        line: usize,
        /// Offending line (comment stripped).
        content: String,
    },
    /// A coordinate is not an integer.
    #[error("line {line}: invalid coordinate `{value}`")]
    InvalidCoordinate {
        /// 1-based line number.
        line: usize,
        /// Offending field.
        value: String,
    },
    /// Two stations share a name.
    #[error("line {line}: duplicate station name `{name}`")]
    DuplicateStation {
        /// 1-based line number.
        line: usize,
        /// Repeated name.
        name: String,
    },
    /// A connection line is not `name-name`.
    #[error("line {line}: malformed connection `{content}`")]
    MalformedConnection {
        /// 1-based line number.
        line: usize,
        /// Offending line (comment stripped).
        content: String,
    },
    /// A connection names a station that was never declared.
    #[error("line {line}: connection references unknown station `{name}`")]
    UnknownStation {
        /// 1-based line number.
        line: usize,
        /// Unresolved name.
        name: String,
    },
    /// A station connected to itself.
    #[error("line {line}: station `{name}` connects to itself")]
    SelfLoop {
        /// 1-based line number.
        line: usize,
        /// Station name.
        name: String,
    },
    /// The same connection declared twice, in either direction.
    #[error("line {line}: duplicate connection `{content}`")]
    DuplicateConnection {
        /// 1-based line number.
        line: usize,
        /// Offending line (comment stripped).
        content: String,
    },
    /// Content appears before any section header.
    #[error("line {line}: `{content}` is outside the stations/connections sections")]
    OutsideSection {
        /// 1-based line number.
        line: usize,
        /// Offending line (comment stripped).
        content: String,
    },
    /// The network rejected a connection.
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// The map declares no stations.
    #[error("network map declares no stations")]
    NoStations,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Stations,
    Connections,
}

/// Reads and parses a network map file.
pub fn load_network(path: impl AsRef<Path>) -> Result<Network, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let network = parse_network(&text)?;
    debug!(
        "loaded {} stations and {} connections from {}",
        network.len(),
        network.num_connections(),
        path.display()
    );
    Ok(network)
}

/// Parses a network map.
///
/// The format has a `stations:` section of `name,x,y` lines followed by a
/// `connections:` section of `name-name` lines. `#` starts a comment.
///
/// # Examples
///
/// ```
/// use u_dispatch::loader::parse_network;
///
/// let text = "\
/// stations:
/// A,0,0
/// B,1,0  # halt
/// connections:
/// A-B
/// ";
/// let net = parse_network(text).unwrap();
/// assert_eq!(net.len(), 2);
/// assert!(net.is_connected(0, 1));
/// ```
pub fn parse_network(text: &str) -> Result<Network, MapError> {
    let mut network = Network::new();
    let mut section = Section::None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        match content {
            "" => continue,
            "stations:" => {
                section = Section::Stations;
                continue;
            }
            "connections:" => {
                section = Section::Connections;
                continue;
            }
            _ => {}
        }

        match section {
            Section::None => {
                return Err(MapError::OutsideSection {
                    line,
                    content: content.to_string(),
                })
            }
            Section::Stations => {
                let (name, x, y) = parse_station(line, content)?;
                if network.lookup(name).is_some() {
                    return Err(MapError::DuplicateStation {
                        line,
                        name: name.to_string(),
                    });
                }
                network.add_station(name, x, y);
            }
            Section::Connections => parse_connection(line, content, &mut network)?,
        }
    }

    if network.is_empty() {
        return Err(MapError::NoStations);
    }
    Ok(network)
}

fn parse_station(line: usize, content: &str) -> Result<(&str, i64, i64), MapError> {
    let fields: Vec<&str> = content.split(',').map(str::trim).collect();
    let [name, x, y] = fields[..] else {
        return Err(MapError::MalformedStation {
            line,
            content: content.to_string(),
        });
    };
    if name.is_empty() {
        return Err(MapError::MalformedStation {
            line,
            content: content.to_string(),
        });
    }
    let coordinate = |value: &str| {
        value.parse::<i64>().map_err(|_| MapError::InvalidCoordinate {
            line,
            value: value.to_string(),
        })
    };
    Ok((name, coordinate(x)?, coordinate(y)?))
}

fn parse_connection(line: usize, content: &str, network: &mut Network) -> Result<(), MapError> {
    let fields: Vec<&str> = content.split('-').map(str::trim).collect();
    let [from, to] = fields[..] else {
        return Err(MapError::MalformedConnection {
            line,
            content: content.to_string(),
        });
    };
    let resolve = |name: &str| {
        network.lookup(name).ok_or_else(|| MapError::UnknownStation {
            line,
            name: name.to_string(),
        })
    };
    let (a, b) = (resolve(from)?, resolve(to)?);
    if a == b {
        return Err(MapError::SelfLoop {
            line,
            name: from.to_string(),
        });
    }
    if network.is_connected(a, b) {
        return Err(MapError::DuplicateConnection {
            line,
            content: content.to_string(),
        });
    }
    network.connect(a, b)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
# demo network
stations:
A,0,0
B,1,0
C,2,0

connections:
A-B   # first leg
B-C
";

    #[test]
    fn test_parse_small_map() {
        let net = parse_network(SMALL).expect("valid");
        assert_eq!(net.len(), 3);
        assert_eq!(net.num_connections(), 2);
        assert_eq!(net.lookup("C"), Some(2));
        assert_eq!(net.station(1).coordinates(), (1, 0));
        assert!(net.is_connected(1, 2));
        assert!(!net.is_connected(0, 2));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let net = parse_network("stations:\n north , -3 , 4\nsouth,0,0\nconnections:\nnorth - south\n")
            .expect("valid");
        assert_eq!(net.station(0).name(), "north");
        assert_eq!(net.station(0).coordinates(), (-3, 4));
        assert!(net.is_connected(0, 1));
    }

    #[test]
    fn test_malformed_station() {
        let err = parse_network("stations:\nA,0\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedStation { line: 2, .. }));
        let err = parse_network("stations:\n,0,0\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedStation { line: 2, .. }));
    }

    #[test]
    fn test_invalid_coordinate() {
        let err = parse_network("stations:\nA,x,0\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidCoordinate { line: 2, ref value } if value == "x"
        ));
    }

    #[test]
    fn test_duplicate_station() {
        let err = parse_network("stations:\nA,0,0\nA,1,1\n").unwrap_err();
        assert!(matches!(err, MapError::DuplicateStation { line: 3, .. }));
    }

    #[test]
    fn test_unknown_station_in_connection() {
        let err = parse_network("stations:\nA,0,0\nconnections:\nA-Z\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::UnknownStation { line: 4, ref name } if name == "Z"
        ));
    }

    #[test]
    fn test_duplicate_connection_either_direction() {
        let text = "stations:\nA,0,0\nB,1,0\nconnections:\nA-B\nB-A\n";
        let err = parse_network(text).unwrap_err();
        assert!(matches!(err, MapError::DuplicateConnection { line: 6, .. }));
    }

    #[test]
    fn test_self_loop() {
        let err = parse_network("stations:\nA,0,0\nconnections:\nA-A\n").unwrap_err();
        assert!(matches!(err, MapError::SelfLoop { line: 4, .. }));
    }

    #[test]
    fn test_malformed_connection() {
        let err = parse_network("stations:\nA,0,0\nconnections:\nA\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedConnection { line: 4, .. }));
    }

    #[test]
    fn test_content_outside_section() {
        let err = parse_network("A,0,0\n").unwrap_err();
        assert!(matches!(err, MapError::OutsideSection { line: 1, .. }));
    }

    #[test]
    fn test_no_stations() {
        assert!(matches!(
            parse_network("# nothing here\n").unwrap_err(),
            MapError::NoStations
        ));
    }

    #[test]
    fn test_network_error_converts() {
        let err = MapError::from(NetworkError::UnknownStation(4));
        assert!(matches!(err, MapError::Network(NetworkError::UnknownStation(4))));
        assert_eq!(err.to_string(), "unknown station id 4");
    }

    #[test]
    fn test_duplicate_station_keeps_first() {
        let err = parse_network("stations:\nA,0,0\nB,1,0\nA,2,0\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::DuplicateStation { line: 4, ref name } if name == "A"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_network("/definitely/not/a/map.txt").unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }
}
