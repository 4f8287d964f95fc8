/// Common test utilities for taxprof integration tests
///
/// Fixture load files are written into a temporary directory owned by the
/// caller, so they disappear when the test ends.
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A small slice of the NCBI tree. Children appear before their parents so
/// that loading has to resolve forward references.
pub const ENTEROBACTERIA_DTX: &str = "\
562\t561\t0\t0\tspecies\tEscherichia coli
83333\t562\t0\t0\tstrain\tEscherichia coli K-12
561\t543\t0\t0\tgenus\tEscherichia
623\t620\t0\t0\tspecies\tShigella flexneri
624\t620\t0\t0\tspecies\tShigella sonnei
620\t543\t0\t0\tgenus\tShigella
543\t91347\t0\t0\tfamily\tEnterobacteriaceae
91347\t1236\t0\t0\torder\tEnterobacterales
1236\t1224\t0\t0\tclass\tGammaproteobacteria
1224\t2\t0\t0\tphylum\tProteobacteria
1280\t1279\t0\t0\tspecies\tStaphylococcus aureus
1279\t90964\t0\t0\tgenus\tStaphylococcus
90964\t1385\t0\t0\tfamily\tStaphylococcaceae
1385\t91061\t0\t0\torder\tBacillales
91061\t1239\t0\t0\tclass\tBacilli
1239\t2\t0\t0\tphylum\tFirmicutes
2\t131567\t1\t0\tsuperkingdom\tBacteria
131567\t1\t0\t1\tno rank\tcellular organisms
1\t1\t0\t1\tno rank\troot
";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

#[allow(dead_code)]
pub fn write_gz_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let file = fs::File::create(&path).expect("Failed to create fixture");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(contents.as_bytes())
        .expect("Failed to write fixture");
    encoder.finish().expect("Failed to finish gzip stream");
    path
}
