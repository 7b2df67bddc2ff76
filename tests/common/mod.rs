//! Common test utilities and helpers.
//!
//! `SectionBuilder` assembles `.debug_aranges` bytes the way compilers lay
//! them out, so tests can describe sections as data instead of hex dumps.

#![allow(dead_code)]

use dwarf_aranges::Endian;
use std::io::Write;
use tempfile::NamedTempFile;

/// Description of one set.
#[derive(Debug, Clone)]
pub struct SetSpec {
    pub cu_offset: u64,
    pub address_size: u8,
    pub segment_size: u8,
    pub dwarf64: bool,
    pub version: u16,
    pub tuples: Vec<(u64, u64)>,
}

impl SetSpec {
    pub fn new(cu_offset: u64, address_size: u8, tuples: &[(u64, u64)]) -> Self {
        Self {
            cu_offset,
            address_size,
            segment_size: 0,
            dwarf64: false,
            version: 2,
            tuples: tuples.to_vec(),
        }
    }

    pub fn dwarf64(mut self) -> Self {
        self.dwarf64 = true;
        self
    }

    pub fn segment_size(mut self, segment_size: u8) -> Self {
        self.segment_size = segment_size;
        self
    }
}

/// Test-only writer for `.debug_aranges` sections.
pub struct SectionBuilder {
    endian: Endian,
    data: Vec<u8>,
}

impl SectionBuilder {
    pub fn new(endian: Endian) -> Self {
        Self {
            endian,
            data: Vec::new(),
        }
    }

    pub fn little() -> Self {
        Self::new(Endian::Little)
    }

    /// Append a 32-bit DWARF set with flat addressing.
    pub fn set(self, cu_offset: u64, address_size: u8, tuples: &[(u64, u64)]) -> Self {
        self.push(SetSpec::new(cu_offset, address_size, tuples))
    }

    pub fn push(mut self, spec: SetSpec) -> Self {
        let start = self.data.len();
        let mut out = Vec::new();

        if spec.dwarf64 {
            out.extend_from_slice(&[0xff; 4]);
            self.put_uint(&mut out, 0, 8); // patched below
        } else {
            self.put_uint(&mut out, 0, 4);
        }
        let length_field = out.len();

        self.put_uint(&mut out, u64::from(spec.version), 2);
        self.put_uint(&mut out, spec.cu_offset, if spec.dwarf64 { 8 } else { 4 });
        out.push(spec.address_size);
        out.push(spec.segment_size);

        let width = usize::from(spec.address_size);
        let tuple = (width * 2).max(1);
        while (start + out.len()) % tuple != 0 {
            out.push(0);
        }
        for &(addr, len) in spec.tuples.iter().chain(std::iter::once(&(0, 0))) {
            self.put_uint(&mut out, addr, width);
            self.put_uint(&mut out, len, width);
        }

        let unit_length = (out.len() - length_field) as u64;
        let mut patched = Vec::new();
        self.put_uint(&mut patched, unit_length, if spec.dwarf64 { 8 } else { 4 });
        out[length_field - patched.len()..length_field].copy_from_slice(&patched);

        self.data.extend(out);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    fn put_uint(&self, out: &mut Vec<u8>, value: u64, width: usize) {
        let bytes = match self.endian {
            Endian::Little => value.to_le_bytes(),
            Endian::Big => value.to_be_bytes(),
        };
        match self.endian {
            Endian::Little => out.extend_from_slice(&bytes[..width]),
            Endian::Big => out.extend_from_slice(&bytes[8 - width..]),
        }
    }
}

/// Creates a temporary file with the given content.
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}

/// Wrap a `.debug_aranges` payload in a relocatable ELF file.
pub fn elf_with_aranges(section: Option<&[u8]>, endian: Endian) -> Vec<u8> {
    use object::write::Object as WriteObject;
    use object::{Architecture, BinaryFormat, Endianness, SectionKind};

    let (arch, endianness) = match endian {
        Endian::Little => (Architecture::X86_64, Endianness::Little),
        Endian::Big => (Architecture::PowerPc64, Endianness::Big),
    };
    let mut obj = WriteObject::new(BinaryFormat::Elf, arch, endianness);
    let text = obj.add_section(Vec::new(), b".text".to_vec(), SectionKind::Text);
    obj.append_section_data(text, &[0x90; 16], 16);
    if let Some(bytes) = section {
        let id = obj.add_section(Vec::new(), b".debug_aranges".to_vec(), SectionKind::Debug);
        obj.append_section_data(id, bytes, 1);
    }
    obj.write().unwrap()
}

/// Wrap a `.debug_aranges` payload in an x86_64 Mach-O object, where it
/// lives in `__DWARF,__debug_aranges`.
pub fn macho_with_aranges(section: &[u8]) -> Vec<u8> {
    use object::write::Object as WriteObject;
    use object::{Architecture, BinaryFormat, Endianness, SectionKind};

    let mut obj = WriteObject::new(BinaryFormat::MachO, Architecture::X86_64, Endianness::Little);
    let text = obj.add_section(b"__TEXT".to_vec(), b"__text".to_vec(), SectionKind::Text);
    obj.append_section_data(text, &[0x90; 16], 16);
    let id = obj.add_section(
        b"__DWARF".to_vec(),
        b"__debug_aranges".to_vec(),
        SectionKind::Debug,
    );
    obj.append_section_data(id, section, 1);
    obj.write().unwrap()
}

/// Wrap a `.debug_aranges` payload in a little-endian ELF file as a
/// `SHF_COMPRESSED` section holding a zlib stream.
pub fn elf_with_compressed_aranges(section: &[u8]) -> Vec<u8> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use object::elf::{ELFCOMPRESS_ZLIB, SHF_COMPRESSED};
    use object::write::Object as WriteObject;
    use object::{Architecture, BinaryFormat, Endianness, SectionFlags, SectionKind};

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(section).unwrap();
    let stream = encoder.finish().unwrap();

    // Elf64_Chdr: ch_type, ch_reserved, ch_size, ch_addralign.
    let mut payload = Vec::new();
    payload.extend_from_slice(&ELFCOMPRESS_ZLIB.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload.extend_from_slice(&(section.len() as u64).to_le_bytes());
    payload.extend_from_slice(&1u64.to_le_bytes());
    payload.extend_from_slice(&stream);

    let mut obj = WriteObject::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    let id = obj.add_section(Vec::new(), b".debug_aranges".to_vec(), SectionKind::Debug);
    obj.section_mut(id).flags = SectionFlags::Elf {
        sh_flags: u64::from(SHF_COMPRESSED),
    };
    obj.append_section_data(id, &payload, 8);
    obj.write().unwrap()
}
