use quick_error::quick_error;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum NeuropaintError {
        /// A score cell could not be interpreted as a real number.
        TypeConversion(column: String, row: usize, value: String) {
            display("Score column '{}', row {}: cannot convert '{}' to a number", column, row, value)
        }

        /// A vertex of the parcellation references a region id that has no region name.
        RegionIndexOutOfRange(vertex: usize, region_id: i32, num_regions: usize) {
            display("Vertex {} has region id {}, but the parcellation only has {} regions", vertex, region_id, num_regions)
        }

        MissingLabelColumn {
            display("Score table has no 'label' column")
        }

        DuplicateColumn(column: String) {
            display("Score table column '{}' is not unique", column)
        }

        ColumnLengthMismatch(column: String, expected: usize, actual: usize) {
            display("Score table column '{}' has {} values, expected {}", column, actual, expected)
        }

        /// Two per-vertex arrays that describe the same mesh differ in length.
        VertexCountMismatch(what: String, expected: usize, actual: usize) {
            display("Vertex count mismatch for {}: expected {}, found {}", what, expected, actual)
        }

        MismatchedHemisphereRegions {
            display("Left and right hemisphere parcellations do not share the same region names")
        }

        UnknownColormap(name: String) {
            display("Unknown colormap '{}'", name)
        }

        InvalidCurvFormat {
            display("Invalid Curv file")
        }

        InvalidFsSurfaceFormat {
            display("Invalid FreeSurfer surf file")
        }

        UnsupportedFsAnnotFormatVersion {
            display("Unsupported FreeSurfer annot file format version")
        }

        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
        }

        /// CSV parsing error
        Csv(err: csv::Error) {
            from()
            source(err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, NeuropaintError>;
