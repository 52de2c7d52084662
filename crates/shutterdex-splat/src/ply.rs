//! Restricted PLY header reader.
//!
//! Reads just enough of a `.ply` header to describe the scan to the
//! display layer: storage format, vertex count, and the scalar vertex
//! property layout. Anything outside that envelope (list properties on
//! the vertex element, missing magic, a header that never ends inside the
//! supplied window) parses to `None`. Point data is never touched.

use std::str::FromStr;

/// Storage format declared by a PLY header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl PlyFormat {
    /// Whether vertex data follows in a binary layout.
    pub fn is_binary(&self) -> bool {
        !matches!(self, Self::Ascii)
    }
}

/// Scalar property type of a vertex element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyScalar {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
}

impl PlyScalar {
    /// Size of one value in a binary layout.
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Char | Self::UChar => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Double => 8,
        }
    }
}

impl FromStr for PlyScalar {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" | "int8" => Ok(Self::Char),
            "uchar" | "uint8" => Ok(Self::UChar),
            "short" | "int16" => Ok(Self::Short),
            "ushort" | "uint16" => Ok(Self::UShort),
            "int" | "int32" => Ok(Self::Int),
            "uint" | "uint32" => Ok(Self::UInt),
            "float" | "float32" => Ok(Self::Float),
            "double" | "float64" => Ok(Self::Double),
            _ => Err(()),
        }
    }
}

/// One scalar property of the vertex element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyProperty {
    pub scalar: PlyScalar,
    pub name: String,
}

/// Parsed vertex layout of a PLY header.
#[derive(Debug, Clone, PartialEq)]
pub struct PlyHeader {
    pub format: PlyFormat,
    pub vertex_count: u64,
    pub properties: Vec<PlyProperty>,
}

impl PlyHeader {
    /// Parse the header from the leading bytes of a `.ply` file.
    ///
    /// The window must contain the complete header (`ply` magic through
    /// `end_header`). Elements other than `vertex` are skipped along with
    /// their properties.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(bytes);
        let mut lines = text.lines().map(str::trim);

        if lines.next()? != "ply" {
            return None;
        }

        let mut format = None;
        let mut vertex_count = None;
        let mut properties = Vec::new();
        let mut in_vertex_element = false;
        let mut ended = false;

        for line in lines {
            if line.is_empty() || line.starts_with("comment") || line.starts_with("obj_info") {
                continue;
            }
            if line == "end_header" {
                ended = true;
                break;
            }

            let mut words = line.split_whitespace();
            match words.next()? {
                "format" => {
                    format = Some(match words.next()? {
                        "ascii" => PlyFormat::Ascii,
                        "binary_little_endian" => PlyFormat::BinaryLittleEndian,
                        "binary_big_endian" => PlyFormat::BinaryBigEndian,
                        _ => return None,
                    });
                }
                "element" => {
                    let name = words.next()?;
                    let count = words.next()?.parse::<u64>().ok()?;
                    in_vertex_element = name == "vertex";
                    if in_vertex_element {
                        vertex_count = Some(count);
                    }
                }
                "property" if in_vertex_element => {
                    let type_word = words.next()?;
                    if type_word == "list" {
                        // List properties make the stride data-dependent;
                        // outside this reader's envelope.
                        return None;
                    }
                    let scalar = type_word.parse::<PlyScalar>().ok()?;
                    let name = words.next()?.to_string();
                    properties.push(PlyProperty { scalar, name });
                }
                "property" => {} // property of a skipped element
                _ => return None,
            }
        }

        if !ended {
            return None;
        }

        Some(Self {
            format: format?,
            vertex_count: vertex_count?,
            properties,
        })
    }

    /// Bytes per vertex for binary layouts; `None` for ascii storage.
    pub fn vertex_stride(&self) -> Option<usize> {
        self.format
            .is_binary()
            .then(|| self.properties.iter().map(|p| p.scalar.size_bytes()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAUSSIAN_HEADER: &str = "ply\n\
        format binary_little_endian 1.0\n\
        comment generated by a scanner\n\
        element vertex 4242\n\
        property float x\n\
        property float y\n\
        property float z\n\
        property float opacity\n\
        property uchar red\n\
        property uchar green\n\
        property uchar blue\n\
        end_header\n";

    #[test]
    fn test_parse_binary_header() {
        let header = PlyHeader::parse(GAUSSIAN_HEADER.as_bytes()).unwrap();

        assert_eq!(header.format, PlyFormat::BinaryLittleEndian);
        assert_eq!(header.vertex_count, 4242);
        assert_eq!(header.properties.len(), 7);
        assert_eq!(header.properties[0].name, "x");
        assert_eq!(header.properties[4].scalar, PlyScalar::UChar);
    }

    #[test]
    fn test_vertex_stride() {
        let header = PlyHeader::parse(GAUSSIAN_HEADER.as_bytes()).unwrap();
        // 4 floats + 3 uchars.
        assert_eq!(header.vertex_stride(), Some(4 * 4 + 3));
    }

    #[test]
    fn test_ascii_has_no_stride() {
        let ascii = GAUSSIAN_HEADER.replace("binary_little_endian", "ascii");
        let header = PlyHeader::parse(ascii.as_bytes()).unwrap();
        assert_eq!(header.format, PlyFormat::Ascii);
        assert_eq!(header.vertex_stride(), None);
    }

    #[test]
    fn test_other_elements_skipped() {
        let input = "ply\n\
            format ascii 1.0\n\
            element vertex 2\n\
            property float x\n\
            element face 1\n\
            property uchar flags\n\
            end_header\n";
        let header = PlyHeader::parse(input.as_bytes()).unwrap();
        assert_eq!(header.vertex_count, 2);
        assert_eq!(header.properties.len(), 1);
    }

    #[test]
    fn test_type_aliases() {
        let input = "ply\n\
            format binary_big_endian 1.0\n\
            element vertex 1\n\
            property float32 x\n\
            property uint8 tag\n\
            end_header\n";
        let header = PlyHeader::parse(input.as_bytes()).unwrap();
        assert_eq!(header.properties[0].scalar, PlyScalar::Float);
        assert_eq!(header.vertex_stride(), Some(5));
    }

    #[test]
    fn test_rejects_missing_magic() {
        assert!(PlyHeader::parse(b"not a ply file").is_none());
    }

    #[test]
    fn test_rejects_truncated_header() {
        let input = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\n";
        assert!(PlyHeader::parse(input.as_bytes()).is_none());
    }

    #[test]
    fn test_rejects_list_property_on_vertex() {
        let input = "ply\n\
            format ascii 1.0\n\
            element vertex 3\n\
            property list uchar int vertex_indices\n\
            end_header\n";
        assert!(PlyHeader::parse(input.as_bytes()).is_none());
    }
}
