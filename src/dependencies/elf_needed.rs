use std::path::PathBuf ;
use thiserror::Error ;

use crate::ModulePath ;
use super::DependencySource ;



const ELF_MAGIC: &[u8; 4] = b"\x7fELF" ;

const PT_LOAD: u32 = 1 ;
const PT_DYNAMIC: u32 = 2 ;

const DT_NULL: u64 = 0 ;
const DT_NEEDED: u64 = 1 ;
const DT_STRTAB: u64 = 5 ;
const DT_STRSZ: u64 = 10 ;

/// Errors that can occur while reading the dynamic section of a module.
#[derive( Debug, Error )]
pub enum ElfError {
    #[error( "Failed to read '{}': {}", .0.display(), .1 )]
    Io( PathBuf, std::io::Error ),
    #[error( "Not an ELF file" )]
    BadMagic,
    #[error( "Unsupported ELF class: {0}" )]
    UnsupportedClass( u8 ),
    #[error( "Unsupported ELF data encoding: {0}" )]
    UnsupportedEncoding( u8 ),
    #[error( "Truncated ELF data at offset {0:#x}" )]
    Truncated( u64 ),
    #[error( "Dynamic section declares DT_NEEDED entries but no string table" )]
    MissingStringTable,
    #[error( "String table address {0:#x} is not backed by any loadable segment" )]
    UnmappedAddress( u64 ),
    #[error( "Dependency name at string table offset {0:#x} is not valid UTF-8" )]
    InvalidName( u64 ),
}

/// Reads the `DT_NEEDED` entries from a module's dynamic section, in the
/// order the linker recorded them.
///
/// Files without a dynamic section (static objects) have no dependencies.
#[derive( Debug, Default, Clone, Copy )]
pub struct ElfNeeded ;

impl DependencySource for ElfNeeded {
    type Error = ElfError ;

    fn dependencies( &self, module: &ModulePath ) -> Result<Vec<String>, Self::Error> {
        let bytes = std::fs::read( module ).map_err(| err | ElfError::Io( module.as_path().to_path_buf(), err ))?;
        needed_libraries( &bytes )
    }
}

/// Parses `bytes` as an ELF object and returns its `DT_NEEDED` names.
pub fn needed_libraries( bytes: &[u8] ) -> Result<Vec<String>, ElfError> {

    let elf = Elf::new( bytes )?;

    let segments = elf.program_headers()?;
    let Some( dynamic ) = segments.iter().find(| segment | segment.kind == PT_DYNAMIC ) else {
        return Ok( Vec::with_capacity( 0 ));
    };

    let mut needed = Vec::new();
    let mut string_table = None ;
    let mut string_table_size = None ;

    let entry_size = elf.word_size() * 2 ;
    let entry_count = dynamic.file_size / entry_size ;
    for index in 0..entry_count {
        let offset = index.checked_mul( entry_size )
            .and_then(| delta | dynamic.offset.checked_add( delta ))
            .ok_or( ElfError::Truncated( dynamic.offset ))?;
        let tag = elf.word( offset )?;
        let value = elf.word( at( offset, elf.word_size() )? )?;
        match tag {
            DT_NULL => break,
            DT_NEEDED => needed.push( value ),
            DT_STRTAB => string_table = Some( value ),
            DT_STRSZ => string_table_size = Some( value ),
            _ => {},
        }
    }

    if needed.is_empty() { return Ok( Vec::with_capacity( 0 )) }

    let address = string_table.ok_or( ElfError::MissingStringTable )?;
    let segment = segments.iter()
        .filter(| segment | segment.kind == PT_LOAD )
        .find(| segment | address.checked_sub( segment.address ).is_some_and(| delta | delta < segment.file_size ))
        .ok_or( ElfError::UnmappedAddress( address ))?;
    let table_offset = at( segment.offset, address - segment.address )?;

    needed.into_iter()
        .map(| name_offset | {
            let offset = at( table_offset, name_offset )?;
            if string_table_size.is_some_and(| size | name_offset >= size ) {
                return Err( ElfError::Truncated( offset ));
            }
            elf.c_str( offset )
        })
        .collect()

}

/// `base + delta`, where an overflow means the field points past any file.
fn at( base: u64, delta: u64 ) -> Result<u64, ElfError> {
    base.checked_add( delta ).ok_or( ElfError::Truncated( base ))
}

#[derive( Debug, Clone, Copy )]
enum Class { Elf32, Elf64 }

#[derive( Debug, Clone, Copy )]
enum Encoding { Little, Big }

#[derive( Debug )]
struct Segment {
    kind: u32,
    offset: u64,
    address: u64,
    file_size: u64,
}

struct Elf<'a> {
    bytes: &'a [u8],
    class: Class,
    encoding: Encoding,
}

impl<'a> Elf<'a> {

    fn new( bytes: &'a [u8] ) -> Result<Self, ElfError> {
        if bytes.len() < 16 || &bytes[..4] != ELF_MAGIC { return Err( ElfError::BadMagic ) }
        let class = match bytes[4] {
            1 => Class::Elf32,
            2 => Class::Elf64,
            other => return Err( ElfError::UnsupportedClass( other )),
        };
        let encoding = match bytes[5] {
            1 => Encoding::Little,
            2 => Encoding::Big,
            other => return Err( ElfError::UnsupportedEncoding( other )),
        };
        Ok( Self { bytes, class, encoding })
    }

    fn word_size( &self ) -> u64 {
        match self.class { Class::Elf32 => 4, Class::Elf64 => 8 }
    }

    fn program_headers( &self ) -> Result<Vec<Segment>, ElfError> {

        let ( table, entry_size, count ) = match self.class {
            Class::Elf32 => ( u64::from( self.u32( 0x1c )? ), self.u16( 0x2a )?, self.u16( 0x2c )? ),
            Class::Elf64 => ( self.u64( 0x20 )?, self.u16( 0x36 )?, self.u16( 0x38 )? ),
        };

        ( 0..u64::from( count ))
            .map(| index | -> Result<Segment, ElfError> {
                let header = at( table, index * u64::from( entry_size ))?;
                Ok( match self.class {
                    Class::Elf32 => Segment {
                        kind: self.u32( header )?,
                        offset: self.u32( at( header, 0x04 )? )?.into(),
                        address: self.u32( at( header, 0x08 )? )?.into(),
                        file_size: self.u32( at( header, 0x10 )? )?.into(),
                    },
                    Class::Elf64 => Segment {
                        kind: self.u32( header )?,
                        offset: self.u64( at( header, 0x08 )? )?,
                        address: self.u64( at( header, 0x10 )? )?,
                        file_size: self.u64( at( header, 0x20 )? )?,
                    },
                })
            })
            .collect()

    }

    fn slice<const N: usize>( &self, offset: u64 ) -> Result<[u8; N], ElfError> {
        usize::try_from( offset ).ok()
            .and_then(| start | self.bytes.get( start..start.checked_add( N )? ))
            .and_then(| bytes | bytes.try_into().ok() )
            .ok_or( ElfError::Truncated( offset ))
    }

    fn u16( &self, offset: u64 ) -> Result<u16, ElfError> {
        let bytes = self.slice( offset )?;
        Ok( match self.encoding { Encoding::Little => u16::from_le_bytes( bytes ), Encoding::Big => u16::from_be_bytes( bytes ) })
    }

    fn u32( &self, offset: u64 ) -> Result<u32, ElfError> {
        let bytes = self.slice( offset )?;
        Ok( match self.encoding { Encoding::Little => u32::from_le_bytes( bytes ), Encoding::Big => u32::from_be_bytes( bytes ) })
    }

    fn u64( &self, offset: u64 ) -> Result<u64, ElfError> {
        let bytes = self.slice( offset )?;
        Ok( match self.encoding { Encoding::Little => u64::from_le_bytes( bytes ), Encoding::Big => u64::from_be_bytes( bytes ) })
    }

    fn word( &self, offset: u64 ) -> Result<u64, ElfError> {
        match self.class {
            Class::Elf32 => self.u32( offset ).map( u64::from ),
            Class::Elf64 => self.u64( offset ),
        }
    }

    fn c_str( &self, offset: u64 ) -> Result<String, ElfError> {
        let start = usize::try_from( offset ).map_err(| _ | ElfError::Truncated( offset ))?;
        let rest = self.bytes.get( start.. ).ok_or( ElfError::Truncated( offset ))?;
        let length = rest.iter().position(| &byte | byte == 0 ).ok_or( ElfError::Truncated( offset ))?;
        std::str::from_utf8( &rest[..length] )
            .map( str::to_string )
            .map_err(| _ | ElfError::InvalidName( offset ))
    }

}

#[cfg( test )]
mod tests {

    use super::* ;

    struct Builder( Vec<u8> );

    impl Builder {
        fn put_u16( &mut self, offset: usize, value: u16 ) { self.0[offset..offset + 2].copy_from_slice( &value.to_le_bytes() ); }
        fn put_u32( &mut self, offset: usize, value: u32 ) { self.0[offset..offset + 4].copy_from_slice( &value.to_le_bytes() ); }
        fn put_u64( &mut self, offset: usize, value: u64 ) { self.0[offset..offset + 8].copy_from_slice( &value.to_le_bytes() ); }
    }

    /// A 64-bit little-endian object with one PT_LOAD covering the whole
    /// file and a dynamic section listing `libb.so` and `libc.so.6`.
    fn shared_object() -> Vec<u8> {

        let mut elf = Builder( vec![ 0; 0x200 ]);
        elf.0[..4].copy_from_slice( ELF_MAGIC );
        elf.0[4] = 2 ;
        elf.0[5] = 1 ;
        elf.put_u64( 0x20, 0x40 );
        elf.put_u16( 0x36, 56 );
        elf.put_u16( 0x38, 2 );

        elf.put_u32( 0x40, PT_LOAD );
        elf.put_u64( 0x48, 0 );
        elf.put_u64( 0x50, 0x1000 );
        elf.put_u64( 0x60, 0x200 );

        elf.put_u32( 0x78, PT_DYNAMIC );
        elf.put_u64( 0x80, 0x100 );
        elf.put_u64( 0x88, 0x1100 );
        elf.put_u64( 0x98, 0x50 );

        let entries = [( DT_NEEDED, 1 ), ( DT_NEEDED, 9 ), ( DT_STRTAB, 0x1180 ), ( DT_STRSZ, 0x20 ), ( DT_NULL, 0 )];
        for ( index, ( tag, value )) in entries.into_iter().enumerate() {
            elf.put_u64( 0x100 + index * 16, tag );
            elf.put_u64( 0x108 + index * 16, value );
        }

        let strings = b"\0libb.so\0libc.so.6\0" ;
        elf.0[0x180..0x180 + strings.len()].copy_from_slice( strings );

        elf.0

    }

    #[test]
    fn reads_needed_entries_in_order() {
        let needed = needed_libraries( &shared_object() ).unwrap();
        assert_eq!( needed, vec![ "libb.so".to_string(), "libc.so.6".to_string() ]);
    }

    #[test]
    fn object_without_dynamic_section_has_no_dependencies() {
        let mut elf = shared_object();
        elf[0x78..0x7c].copy_from_slice( &PT_LOAD.to_le_bytes() );
        assert!( needed_libraries( &elf ).unwrap().is_empty() );
    }

    #[test]
    fn rejects_non_elf_data() {
        assert!( matches!( needed_libraries( b"#!/bin/sh\necho hi\n" ), Err( ElfError::BadMagic )));
    }

    #[test]
    fn rejects_truncated_program_headers() {
        let elf = shared_object();
        assert!( matches!( needed_libraries( &elf[..0x60] ), Err( ElfError::Truncated( _ ))));
    }

    #[test]
    fn unmapped_string_table_is_reported() {
        let mut elf = shared_object();
        elf[0x128..0x130].copy_from_slice( &0x9000_u64.to_le_bytes() );
        assert!( matches!( needed_libraries( &elf ), Err( ElfError::UnmappedAddress( 0x9000 ))));
    }

    #[test]
    fn oversized_load_segment_does_not_overflow() {
        let mut elf = shared_object();
        elf[0x60..0x68].copy_from_slice( &u64::MAX.to_le_bytes() );
        elf[0x128..0x130].copy_from_slice( &0x2000_u64.to_le_bytes() );
        assert!( matches!( needed_libraries( &elf ), Err( ElfError::Truncated( _ ))));
    }

    #[test]
    fn segment_offset_past_address_space_is_truncated() {
        let mut elf = shared_object();
        elf[0x48..0x50].copy_from_slice( &u64::MAX.to_le_bytes() );
        assert!( matches!( needed_libraries( &elf ), Err( ElfError::Truncated( u64::MAX ))));
    }

    #[test]
    fn program_header_table_past_address_space_is_truncated() {
        let mut elf = shared_object();
        elf[0x20..0x28].copy_from_slice( &( u64::MAX - 0x10 ).to_le_bytes() );
        assert!( matches!( needed_libraries( &elf ), Err( ElfError::Truncated( _ ))));
    }

}
