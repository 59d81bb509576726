//! Common test utilities for integration tests

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Cell value for building test workbooks
#[allow(dead_code)]
pub enum Cell<'a> {
    S(&'a str),
    N(f64),
    E,
}

/// Helper function to build an xlsx workbook in memory from rows of cells
#[allow(dead_code)]
pub fn create_test_xlsx(rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::S(s) => {
                    worksheet.write_string(r as u32, c as u16, *s).unwrap();
                }
                Cell::N(n) => {
                    worksheet.write_number(r as u32, c as u16, *n).unwrap();
                }
                Cell::E => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Price annex with the publisher's layout: title row, market row, unit row,
/// a group row, then products. Bogotá is the second market.
#[allow(dead_code)]
pub fn sample_bulletin_xlsx() -> Vec<u8> {
    use Cell::*;
    create_test_xlsx(&[
        vec![S("Boletín diario de precios mayoristas")],
        vec![
            E,
            S("Medellín, Central Mayorista de Antioquia"),
            E,
            S("Bogotá, Corabastos"),
            E,
        ],
        vec![S("Producto"), S("$/kg"), S("Var %"), S("$/kg"), S("Var %")],
        vec![S("Verduras y hortalizas")],
        vec![S("Tomate chonto"), N(2100.0), N(1.0), N(2500.0), N(-5.26)],
        vec![S("Papa negra"), N(1000.0), N(0.0), S("1.234"), S("12,5")],
        vec![S("Cebolla junca"), N(1800.0), N(0.0), S("n.d."), N(3.0)],
        vec![S("Arveja verde"), N(5200.0), N(2.0), N(4999.9), N(-20.0)],
        vec![S("Zanahoria"), N(900.0), N(0.0), N(950.0), N(7.75)],
        vec![S("Mango Tommy"), N(3000.0), N(0.0), N(3100.0), E],
    ])
}

/// Helper function to build a ZIP archive in memory
#[allow(dead_code)]
pub fn create_test_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

/// Builds a single-member stored ZIP whose central directory declares
/// `declared_size` as the uncompressed size through a zip64 extra field.
/// The member data itself is `content`, unmodified.
#[allow(dead_code)]
pub fn create_zip_with_declared_size(name: &str, content: &[u8], declared_size: u64) -> Vec<u8> {
    let crc = crc32(content);
    let name = name.as_bytes();
    let mut buf = Vec::new();

    // Local file header
    buf.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
    buf.extend_from_slice(&20u16.to_le_bytes()); // version needed
    buf.extend_from_slice(&0u16.to_le_bytes()); // flags
    buf.extend_from_slice(&0u16.to_le_bytes()); // stored
    buf.extend_from_slice(&0u16.to_le_bytes()); // time
    buf.extend_from_slice(&0x21u16.to_le_bytes()); // date
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&(content.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(content.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(name);
    buf.extend_from_slice(content);

    // Central directory entry
    let central_start = buf.len();
    buf.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
    buf.extend_from_slice(&20u16.to_le_bytes()); // version made by
    buf.extend_from_slice(&45u16.to_le_bytes()); // version needed
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0x21u16.to_le_bytes());
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&(content.len() as u32).to_le_bytes());
    buf.extend_from_slice(&u32::MAX.to_le_bytes()); // size lives in the zip64 field
    buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
    buf.extend_from_slice(&12u16.to_le_bytes()); // extra field length
    buf.extend_from_slice(&0u16.to_le_bytes()); // comment length
    buf.extend_from_slice(&0u16.to_le_bytes()); // disk
    buf.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
    buf.extend_from_slice(&0u32.to_le_bytes()); // external attributes
    buf.extend_from_slice(&0u32.to_le_bytes()); // local header offset
    buf.extend_from_slice(name);
    buf.extend_from_slice(&0x0001u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&declared_size.to_le_bytes());
    let central_size = buf.len() - central_start;

    // End of central directory
    buf.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&(central_size as u32).to_le_bytes());
    buf.extend_from_slice(&(central_start as u32).to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf
}

#[allow(dead_code)]
fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// Helper function to build a PDF with one page per entry.
/// An empty string produces a page without any text.
#[allow(dead_code)]
pub fn create_test_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for text in pages {
        let operations = if text.is_empty() {
            vec![]
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Bulletin index page linking to the annex and the city reports archive
#[allow(dead_code)]
pub const SAMPLE_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h1>Componente precios mayoristas</h1>
  <ul>
    <li><a href="/files/sipsa/boletin.pdf">Boletín</a></li>
    <li><a href="/files/sipsa/anexo.xlsx">Anexo</a></li>
    <li><a href="/files/sipsa/ciudades.zip">Informes por ciudades - último día</a></li>
    <li><a href="/files/sipsa/anexo_anterior.xlsx">Anexo</a></li>
  </ul>
</body>
</html>"#;

/// Starts an HTTP/1.1 server on localhost answering from `routes`
/// (path -> (status, body)); unknown paths get 404. Returns the base URL.
#[allow(dead_code)]
pub async fn spawn_fixture_server(routes: Vec<(&str, u16, Vec<u8>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Arc<HashMap<String, (u16, Vec<u8>)>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect(),
    );

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes
                    .get(path)
                    .cloned()
                    .unwrap_or((404, b"not found".to_vec()));
                let reason = if status == 200 { "OK" } else { "Error" };
                let header = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );

                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}
