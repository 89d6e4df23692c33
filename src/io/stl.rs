use super::*;

// ascii stl is laid out as:
// solid <name>
// facet normal nx ny nz
//     outer loop
//         vertex x y z   (x3)
//     endloop
// endfacet
// ... repeats per facet
// endsolid
//
// numbers are written with the shortest representation that parses back to the same f64.

/// Serialize a solid as ASCII STL into `wtr`.
pub fn write_stl_ascii<W: Write>(solid: &Solid, mut wtr: W) -> std::io::Result<()> {
    writeln!(wtr, "solid {}", solid.name())?;
    for facet in solid.facets() {
        let [nx, ny, nz] = facet.normal();
        writeln!(wtr, "facet normal {} {} {}", nx, ny, nz)?;
        writeln!(wtr, "    outer loop")?;
        for [x, y, z] in facet.vertices() {
            writeln!(wtr, "        vertex {} {} {}", x, y, z)?;
        }
        writeln!(wtr, "    endloop")?;
        writeln!(wtr, "endfacet")?;
    }
    writeln!(wtr, "endsolid")?;
    wtr.flush()
}

pub fn to_stl_ascii(solid: &Solid) -> Vec<u8> {
    let mut buf = Vec::new();
    write_stl_ascii(solid, &mut buf).expect("writing stl to memory buffer");
    buf
}

/// Deserialize an ASCII STL.
///
/// Tolerates any whitespace layout and a name after `endsolid`.
pub fn from_stl_ascii(stl: &[u8]) -> Result<Solid> {
    fn de(s: &str) -> std::result::Result<Solid, nom::Err<()>> {
        use nom::{
            bytes::complete::*, character::complete::*, combinator::*, multi::*,
            number::complete::*, sequence::*, IResult, Parser,
        };
        fn ws<'a, G, O>(g: G) -> impl FnMut(&'a str) -> IResult<&'a str, O, ()>
        where
            G: Parser<&'a str, O, ()>,
        {
            preceded(multispace0, g)
        }
        fn p3(i: &str) -> IResult<&str, Point3, ()> {
            map(tuple((ws(double), ws(double), ws(double))), |(x, y, z)| {
                [x, y, z]
            })(i)
        }
        fn facet(i: &str) -> IResult<&str, Facet, ()> {
            let (i, normal) = preceded(ws(tag("facet")), preceded(ws(tag("normal")), p3))(i)?;
            let (i, _) = ws(tag("outer"))(i)?;
            let (i, _) = ws(tag("loop"))(i)?;
            let (i, (a, b, c)) = tuple((
                preceded(ws(tag("vertex")), p3),
                preceded(ws(tag("vertex")), p3),
                preceded(ws(tag("vertex")), p3),
            ))(i)?;
            let (i, _) = ws(tag("endloop"))(i)?;
            let (i, _) = ws(tag("endfacet"))(i)?;
            Ok((i, Facet::from_raw(normal, [a, b, c])))
        }

        let (s, _) = ws(tag("solid"))(s)?;
        let (s, name) = not_line_ending(s)?;
        let (s, facets) = many0(facet)(s)?;
        let (s, _) = ws(tag("endsolid"))(s)?;
        let (s, _) = not_line_ending(s)?;
        let (_, _) = all_consuming(multispace0)(s)?;

        Ok(Solid::new(name.trim(), facets))
    }

    let stl = std::str::from_utf8(stl)
        .map_err(|_| Error::Parse("expecting ascii stl as utf8 string".into()))?;
    de(stl).map_err(|_| Error::Parse("malformed ascii stl".into()))
}

// binary stl serializes as follows:
// **little endian encoding**
// 80 bytes header -- solid name, zero padded
// 4 bytes u32 -- facet count
// (12 bytes f32 x3: normal, 36 bytes f32 x9: vertices, 2 bytes u16: attribute count)
// --> repeats for facets
const HEADER_LEN: usize = 80;

/// Serialize a solid as binary STL into `wtr`.
///
/// Coordinates are narrowed to `f32`, a name longer than the header is truncated.
pub fn write_stl_binary<W: Write>(solid: &Solid, mut wtr: W) -> std::io::Result<()> {
    let mut header = [0u8; HEADER_LEN];
    let name = solid.name().as_bytes();
    let len = name.len().min(HEADER_LEN);
    header[..len].copy_from_slice(&name[..len]);
    wtr.write_all(&header)?;

    let count = u32::try_from(solid.facet_len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "binary stl holds at most u32::MAX facets",
        )
    })?;
    wtr.write_u32::<LE>(count)?;

    for facet in solid.facets() {
        let [a, b, c] = facet.vertices();
        for p in [facet.normal(), a, b, c] {
            for x in p {
                wtr.write_f32::<LE>(x as f32)?;
            }
        }
        wtr.write_u16::<LE>(0)?;
    }

    wtr.flush()
}

pub fn to_stl_binary(solid: &Solid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + solid.facet_len() * 50);
    write_stl_binary(solid, &mut buf).expect("writing stl to memory buffer");
    buf
}

/// Deserialize a binary STL.
pub fn from_stl_binary(stl: &[u8]) -> Result<Solid> {
    fn de(stl: &[u8]) -> std::io::Result<Solid> {
        let mut c = Cursor::new(stl);

        let mut header = [0u8; HEADER_LEN];
        c.read_exact(&mut header)?;
        let name = header.split(|&b| b == 0).next().unwrap_or_default();
        let name = String::from_utf8_lossy(name).trim().to_string();

        let count = c.read_u32::<LE>()? as usize;
        // guard allocation against a bogus count
        let expected = HEADER_LEN as u64 + 4 + count as u64 * 50;
        if (stl.len() as u64) < expected {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }

        let p3 = |c: &mut Cursor<&[u8]>| -> std::io::Result<Point3> {
            Ok([
                c.read_f32::<LE>()? as f64,
                c.read_f32::<LE>()? as f64,
                c.read_f32::<LE>()? as f64,
            ])
        };

        let mut facets = Vec::with_capacity(count);
        for _ in 0..count {
            let normal = p3(&mut c)?;
            let tri = [p3(&mut c)?, p3(&mut c)?, p3(&mut c)?];
            let _attr = c.read_u16::<LE>()?;
            facets.push(Facet::from_raw(normal, tri));
        }

        Ok(Solid::new(name, facets))
    }

    de(stl).map_err(|e| Error::Parse(format!("malformed binary stl: {}", e)))
}
