//! WOFF2 framing of the subset font produced by the subsetting collaborator.
//!
//! The subset comes out as an uncompressed OpenType (sfnt) blob. Framing it as WOFF2
//! only requires re-encoding the table directory and Brotli-compressing the table data;
//! all tables are carried with the null transform, so glyph data is never touched.

use core::iter;

use crate::errors::ParseError;

mod brotli;

pub(crate) const TRUETYPE_VERSION: u32 = 0x_0001_0000;
pub(crate) const CFF_VERSION: u32 = u32::from_be_bytes(*b"OTTO");
const WOFF2_SIGNATURE: u32 = 0x_774f_4632;

const SFNT_HEADER_LEN: usize = 12;
const SFNT_RECORD_LEN: usize = 16;
const WOFF2_HEADER_LEN: usize = 48;

/// Known table tags in the order assigned by the WOFF2 table directory format.
/// Tables outside this list are encoded with an explicit tag.
const KNOWN_TAGS: [[u8; 4]; 63] = [
    *b"cmap", *b"head", *b"hhea", *b"hmtx", *b"maxp", *b"name", *b"OS/2", *b"post", *b"cvt ",
    *b"fpgm", *b"glyf", *b"loca", *b"prep", *b"CFF ", *b"VORG", *b"EBDT", *b"EBLC", *b"gasp",
    *b"hdmx", *b"kern", *b"LTSH", *b"PCLT", *b"VDMX", *b"vhea", *b"vmtx", *b"BASE", *b"GDEF",
    *b"GPOS", *b"GSUB", *b"EBSC", *b"JSTF", *b"MATH", *b"CBDT", *b"CBLC", *b"COLR", *b"CPAL",
    *b"SVG ", *b"sbix", *b"acnt", *b"avar", *b"bdat", *b"bloc", *b"bsln", *b"cvar", *b"fdsc",
    *b"feat", *b"fmtx", *b"fvar", *b"gvar", *b"hsty", *b"just", *b"lcar", *b"mort", *b"morx",
    *b"opbd", *b"prop", *b"trak", *b"Zapf", *b"Silf", *b"Glat", *b"Gloc", *b"Feat", *b"Sill",
];

fn known_tag_index(tag: [u8; 4]) -> Option<u8> {
    let idx = KNOWN_TAGS.iter().position(|&known| known == tag)?;
    Some(u8::try_from(idx).expect("table registry fits in 6 bits"))
}

fn uint_base128_len(value: u32) -> usize {
    if value == 0 {
        1
    } else {
        value.ilog2() as usize / 7 + 1
    }
}

#[allow(clippy::cast_possible_truncation)] // values are masked to 7 bits before the cast
fn write_uint_base128(buffer: &mut Vec<u8>, value: u32) {
    for shift in (1..uint_base128_len(value)).rev() {
        buffer.push(0x80 | ((value >> (shift * 7)) & 0x7f) as u8);
    }
    buffer.push((value & 0x7f) as u8);
}

fn write_u16(buffer: &mut Vec<u8>, value: u16) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

fn write_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

fn align4(len: usize) -> usize {
    len.div_ceil(4) * 4
}

fn read_array<'a, const N: usize>(bytes: &mut &'a [u8]) -> Result<&'a [u8; N], ParseError> {
    let (head, tail) = bytes.split_first_chunk::<N>().ok_or(ParseError::UnexpectedEof)?;
    *bytes = tail;
    Ok(head)
}

fn read_u16(bytes: &mut &[u8]) -> Result<u16, ParseError> {
    read_array(bytes).map(|&chunk| u16::from_be_bytes(chunk))
}

fn read_u32(bytes: &mut &[u8]) -> Result<u32, ParseError> {
    read_array(bytes).map(|&chunk| u32::from_be_bytes(chunk))
}

#[derive(Debug)]
struct TableRecord<'a> {
    tag: [u8; 4],
    /// Offset in the source font; determines the order of the WOFF2 data stream.
    offset: u32,
    data: &'a [u8],
}

impl TableRecord<'_> {
    fn length(&self) -> u32 {
        u32::try_from(self.data.len()).expect("table length overflow")
    }

    fn directory_len(&self) -> usize {
        let tag_len = if known_tag_index(self.tag).is_some() {
            0
        } else {
            4
        };
        1 + tag_len + uint_base128_len(self.length())
    }

    fn write_directory_entry(&self, buffer: &mut Vec<u8>) {
        // Transformation version 3 (the null transform) for `glyf` / `loca`;
        // version 0 is the null transform for all other tables.
        const NULL_TRANSFORM: u8 = 0b_1100_0000;
        const ARBITRARY_TAG: u8 = 63;

        let transform = match &self.tag {
            b"glyf" | b"loca" => NULL_TRANSFORM,
            _ => 0,
        };
        if let Some(idx) = known_tag_index(self.tag) {
            buffer.push(idx | transform);
        } else {
            buffer.push(ARBITRARY_TAG | transform);
            buffer.extend_from_slice(&self.tag);
        }
        write_uint_base128(buffer, self.length());
    }
}

/// Parsed table directory of an sfnt font together with slices of its table data.
#[derive(Debug)]
pub(crate) struct SfntFont<'a> {
    flavor: u32,
    tables: Vec<TableRecord<'a>>,
}

impl<'a> SfntFont<'a> {
    pub(crate) fn parse(font_bytes: &'a [u8]) -> Result<Self, ParseError> {
        let mut bytes = font_bytes;
        let flavor = read_u32(&mut bytes)?;
        if flavor != TRUETYPE_VERSION && flavor != CFF_VERSION {
            return Err(ParseError::UnexpectedFontVersion(flavor));
        }
        let table_count = read_u16(&mut bytes)?;
        read_array::<6>(&mut bytes)?; // searchRange, entrySelector, rangeShift

        let mut tables = Vec::with_capacity(table_count.into());
        for _ in 0..table_count {
            let tag = *read_array::<4>(&mut bytes)?;
            read_array::<4>(&mut bytes)?; // checksum; not represented in WOFF2
            let offset = read_u32(&mut bytes)?;
            let length = read_u32(&mut bytes)?;
            let end = offset
                .checked_add(length)
                .ok_or(ParseError::TableOutOfBounds { tag })?;
            let data = font_bytes
                .get(offset as usize..end as usize)
                .ok_or(ParseError::TableOutOfBounds { tag })?;
            tables.push(TableRecord { tag, offset, data });
        }
        // The WOFF2 data stream must follow the physical table order, which may differ
        // from the tag-sorted directory order of the source font.
        tables.sort_unstable_by_key(|record| record.offset);
        Ok(Self { flavor, tables })
    }

    /// Size of the font once a WOFF2 decoder reconstructs it, with tables padded
    /// to 4-byte boundaries.
    fn total_sfnt_size(&self) -> usize {
        let data_len = self
            .tables
            .iter()
            .map(|record| align4(record.data.len()))
            .sum::<usize>();
        SFNT_HEADER_LEN + self.tables.len() * SFNT_RECORD_LEN + data_len
    }

    /// Concatenated table data without padding, as mandated for the compressed stream.
    fn table_stream(&self) -> Vec<u8> {
        let len = self.tables.iter().map(|record| record.data.len()).sum();
        let mut stream = Vec::with_capacity(len);
        for record in &self.tables {
            stream.extend_from_slice(record.data);
        }
        stream
    }

    /// Serializes this font to the WOFF2 format.
    pub(crate) fn to_woff2(&self) -> Vec<u8> {
        let compressed = brotli::compress(&self.table_stream());
        let directory_len = self
            .tables
            .iter()
            .map(TableRecord::directory_len)
            .sum::<usize>();
        let file_len = align4(WOFF2_HEADER_LEN + directory_len + compressed.len());

        let mut buffer = Vec::with_capacity(file_len);
        write_u32(&mut buffer, WOFF2_SIGNATURE);
        write_u32(&mut buffer, self.flavor);
        write_u32(&mut buffer, file_len.try_into().expect("file length overflow"));
        // `unwrap()` is safe: the table count was read from a u16
        write_u16(&mut buffer, self.tables.len().try_into().unwrap());
        write_u16(&mut buffer, 0); // reserved
        let total_sfnt_size = self.total_sfnt_size();
        write_u32(
            &mut buffer,
            total_sfnt_size.try_into().expect("sfnt size overflow"),
        );
        write_u32(
            &mut buffer,
            compressed.len().try_into().expect("compressed size overflow"),
        );
        write_u16(&mut buffer, 0); // majorVersion
        write_u16(&mut buffer, 0); // minorVersion
        write_u32(&mut buffer, 0); // metaOffset
        write_u32(&mut buffer, 0); // metaLength
        write_u32(&mut buffer, 0); // metaOrigLength
        write_u32(&mut buffer, 0); // privOffset
        write_u32(&mut buffer, 0); // privLength
        debug_assert_eq!(buffer.len(), WOFF2_HEADER_LEN);

        for record in &self.tables {
            record.write_directory_entry(&mut buffer);
        }
        debug_assert_eq!(buffer.len(), WOFF2_HEADER_LEN + directory_len);
        buffer.extend_from_slice(&compressed);

        // The file must be padded to a 4-byte boundary even without metadata
        // or private blocks.
        buffer.extend(iter::repeat_n(0_u8, file_len - buffer.len()));
        buffer
    }
}
