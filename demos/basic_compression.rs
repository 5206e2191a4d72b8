use text_huffman::{HuffmanCodec, HuffmanConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    let dir = std::env::temp_dir();
    let text_path = dir.join("sample.txt");
    let bin_path = dir.join("sample.bin");
    let out_path = dir.join("decompressed.txt");
    std::fs::write(&text_path, sample_text)?;

    println!("Created sample file: {} bytes", sample_text.len());

    let config = HuffmanConfig::default();
    let codec = HuffmanCodec::from_file(&text_path, config.clone())?;
    codec.encode_file(&text_path, &bin_path)?;

    let compressed_size = std::fs::metadata(&bin_path)?.len();
    let compression_ratio = compressed_size as f64 / sample_text.len() as f64;
    println!(
        "Compressed to: {} bytes ({:.1}% of original, {} distinct symbols)",
        compressed_size,
        compression_ratio * 100.0,
        codec.table().len()
    );

    HuffmanCodec::decode_file(&bin_path, &out_path, &config)?;
    let decompressed_text = std::fs::read_to_string(&out_path)?;

    if sample_text != decompressed_text {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful! Data matches exactly.");

    for word in ["escalera", "sitio", "pie", "suelo"] {
        match codec.encode_text(word) {
            Ok(bits) => println!("{word}: {bits}"),
            Err(e) => println!("{word}: {e}"),
        }
    }

    std::fs::remove_file(&text_path)?;
    std::fs::remove_file(&bin_path)?;
    std::fs::remove_file(&out_path)?;

    Ok(())
}
