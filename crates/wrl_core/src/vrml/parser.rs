//! WRL (VRML 2.0 dump) parser.
//!
//! Walks the file line by line with one function per block kind. Only the
//! subset written by N64 VRML dumpers is understood:
//!
//! - `Shape { ... }` at top level
//! - `appearance DEF <name> Appearance { ... }`
//!   - `material Material { ambientIntensity, diffuseColor, specularColor, emissiveColor, transparency }`
//!   - `texture ImageTexture { url, repeatS }`
//! - `geometry DEF <name> IndexedFaceSet { ... }`
//!   - `coord Coordinate { point [ x y z, ... ] }`
//!   - `texCoord TextureCoordinate { point [ u v, ... ] }`
//!   - `color Color { color [ r g b, ... ] }`
//!
//! Anything else is skipped. A `{` block closes only on `}` and a `[` list
//! only on `]`, judged by the first token of a line. A recognized block header
//! must end with its opener (or with an empty `{ }` / `[ ]` pair); data on the
//! header line or a `USE` reference is a malformed field.

use std::fmt;

use thiserror::Error;
use wrl_math::{yup_to_zup, Vec2, Vec3};

use super::options::ParseOptions;
use super::tokens::{closer_for, first_string, is_opener, opener_for, strip_list_comma, LineCursor};
use crate::mesh::Mesh;
use crate::scene::{Material, Scene};

/// The stack of block keywords open at a point in the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockPath(pub Vec<String>);

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "top level")
        } else {
            write!(f, "{}", self.0.join(" > "))
        }
    }
}

/// Errors that can occur during WRL parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is empty")]
    EmptyFile,

    /// `line` is where the innermost unclosed block was opened.
    #[error("Unexpected end of file: block opened at line {line} is never closed ({block_path})")]
    UnexpectedEndOfFile { line: usize, block_path: BlockPath },

    #[error("Malformed `{keyword}` at line {line} ({block_path}): {message}")]
    MalformedField {
        line: usize,
        keyword: String,
        message: String,
        block_path: BlockPath,
    },
}

impl ParseError {
    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEndOfFile { line, .. } | ParseError::MalformedField { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }

    /// Blocks open when the error occurred, if any.
    pub fn block_path(&self) -> Option<&BlockPath> {
        match self {
            ParseError::UnexpectedEndOfFile { block_path, .. }
            | ParseError::MalformedField { block_path, .. } => Some(block_path),
            _ => None,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An open block: its keyword and 1-based header line.
struct Frame<'a> {
    keyword: &'a str,
    line: usize,
}

/// WRL file parser.
pub struct WrlParser<'a> {
    cursor: LineCursor<'a>,
    options: ParseOptions,
    open_blocks: Vec<Frame<'a>>,
}

impl<'a> WrlParser<'a> {
    /// Create a new parser from file contents.
    pub fn new(content: &'a str, options: ParseOptions) -> Self {
        Self {
            cursor: LineCursor::new(content),
            options,
            open_blocks: Vec::new(),
        }
    }

    /// Parse the whole file into a scene (without provenance).
    pub fn parse(mut self) -> ParseResult<Scene> {
        if self.cursor.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        let mut scene = Scene::default();

        while let Some(tokens) = self.cursor.tokens() {
            if tokens.len() >= 2 && tokens[0] == "Shape" && tokens[1] == "{" {
                self.parse_shape(&mut scene)?;
            }
            self.cursor.advance();
        }

        Ok(scene)
    }

    /// Parse a `Shape` block and hand the result to the scene for deduplication.
    fn parse_shape(&mut self, scene: &mut Scene) -> ParseResult<()> {
        let mut material = Material::default();
        let mut mesh = Mesh::default();

        self.walk_block("}", |p, tokens| match tokens[0] {
            "appearance" => p.parse_appearance(tokens, &mut material),
            "geometry" => p.parse_geometry(tokens, &mut mesh),
            _ => p.skip_unknown(tokens),
        })?;

        log::debug!(
            "Shape: mesh {} ({} points), material {}",
            mesh.name,
            mesh.points.len(),
            material.name
        );
        scene.add_shape(material, mesh, self.options.equality);

        Ok(())
    }

    fn parse_appearance(&mut self, header: &[&'a str], material: &mut Material) -> ParseResult<()> {
        if let Some(name) = header_name(header) {
            material.name = name.to_string();
        }

        self.walk_block("}", |p, tokens| match tokens[0] {
            "material" => p.parse_material_fields(material),
            "texture" => p.parse_texture_fields(material),
            _ => p.skip_unknown(tokens),
        })
    }

    fn parse_material_fields(&mut self, material: &mut Material) -> ParseResult<()> {
        self.walk_block("}", |p, tokens| {
            let keyword = tokens[0];
            match keyword {
                "ambientIntensity" => material.ambient_intensity = p.number(keyword, tokens, 1)?,
                "diffuseColor" => material.diffuse_color = p.vec3(keyword, tokens, 1)?,
                "specularColor" => material.specular_color = p.vec3(keyword, tokens, 1)?,
                "emissiveColor" => material.emissive_color = p.vec3(keyword, tokens, 1)?,
                "transparency" => {
                    let transparency = p.number(keyword, tokens, 1)?;
                    material.alpha = alpha_from_transparency(transparency, p.cursor.line_number());
                }
                _ => p.skip_unknown(tokens)?,
            }
            Ok(())
        })
    }

    fn parse_texture_fields(&mut self, material: &mut Material) -> ParseResult<()> {
        self.walk_block("}", |p, tokens| {
            let keyword = tokens[0];
            match keyword {
                "url" => {
                    // SFString (`url "a.bmp"`) or MFString (`url [ "a.bmp" ]`); the first entry wins
                    let url = match &tokens[1..] {
                        [] => None,
                        ["["] => p
                            .parse_list(|_, entry| Ok(first_string(&entry.join(" ")).to_string()))?
                            .into_iter()
                            .next(),
                        ["[", inner @ .., "]"] => Some(first_string(&inner.join(" ")).to_string()),
                        value => Some(first_string(&value.join(" ")).to_string()),
                    };

                    match url.filter(|url| !url.is_empty()) {
                        Some(url) => material.texture_url = Some(url),
                        None => return Err(p.malformed(keyword, "missing texture url".to_string())),
                    }
                }
                "repeatS" => {
                    let value = tokens
                        .get(1)
                        .ok_or_else(|| p.malformed(keyword, "missing TRUE/FALSE value".to_string()))?;
                    material.texture_repeat = *value == "TRUE";
                }
                _ => p.skip_unknown(tokens)?,
            }
            Ok(())
        })
    }

    fn parse_geometry(&mut self, header: &[&'a str], mesh: &mut Mesh) -> ParseResult<()> {
        if let Some(name) = header_name(header) {
            mesh.name = name.to_string();
        }

        self.walk_block("}", |p, tokens| match tokens[0] {
            "coord" => p.parse_coord(&mut mesh.points),
            "texCoord" => p.parse_tex_coord(&mut mesh.texcoords),
            "color" => p.parse_color(&mut mesh.colors),
            _ => p.skip_unknown(tokens),
        })
    }

    /// `coord Coordinate { point [ ... ] }`, remapped to Z-up.
    fn parse_coord(&mut self, points: &mut Vec<Vec3>) -> ParseResult<()> {
        self.walk_block("}", |p, tokens| match tokens[0] {
            "point" => {
                let list = p.parse_list(|p, entry| p.vec3("point", entry, 0).map(yup_to_zup))?;
                points.extend(list);
                Ok(())
            }
            _ => p.skip_unknown(tokens),
        })
    }

    /// `texCoord TextureCoordinate { point [ ... ] }`
    fn parse_tex_coord(&mut self, texcoords: &mut Vec<Vec2>) -> ParseResult<()> {
        self.walk_block("}", |p, tokens| match tokens[0] {
            "point" => {
                let list = p.parse_list(|p, entry| p.vec2("point", entry, 0))?;
                texcoords.extend(list);
                Ok(())
            }
            _ => p.skip_unknown(tokens),
        })
    }

    /// `color Color { color [ ... ] }`
    fn parse_color(&mut self, colors: &mut Vec<Vec3>) -> ParseResult<()> {
        self.walk_block("}", |p, tokens| match tokens[0] {
            "color" => {
                let list = p.parse_list(|p, entry| p.vec3("color", entry, 0))?;
                colors.extend(list);
                Ok(())
            }
            _ => p.skip_unknown(tokens),
        })
    }

    /// Parse a `[ ... ]` list opened on the current line, one entry per line.
    fn parse_list<T, F>(&mut self, mut entry: F) -> ParseResult<Vec<T>>
    where
        F: FnMut(&Self, &[&'a str]) -> ParseResult<T>,
    {
        let mut items = Vec::new();
        self.walk_block("]", |p, tokens| {
            items.push(entry(&*p, tokens)?);
            Ok(())
        })?;
        Ok(items)
    }

    /// Walk the body of the block whose header is the current line.
    ///
    /// `on_line` is called for every non-blank body line with the cursor on
    /// that line; nested blocks it parses must leave the cursor on their own
    /// closing line. Returns with the cursor on this block's closing line.
    fn walk_block<F>(&mut self, closer: &str, mut on_line: F) -> ParseResult<()>
    where
        F: FnMut(&mut Self, &[&'a str]) -> ParseResult<()>,
    {
        let header = self.current()?;
        let keyword = header.first().copied().unwrap_or_default();
        let opener = opener_for(closer).unwrap_or_default();

        match header.as_slice() {
            // `point [ ]` or `Shape { }` on a single line
            [_, .., open, close] if *open == opener && *close == closer => {
                log::debug!("Empty inline {} block at line {}", keyword, self.cursor.line_number());
                return Ok(());
            }
            [_, .., open] if *open == opener => {}
            _ => {
                return Err(self.malformed(
                    keyword,
                    format!("expected the line to end with `{}`, found `{}`", opener, header.join(" ")),
                ))
            }
        }

        self.enter(keyword);
        self.cursor.advance();

        loop {
            let tokens = self.current()?;
            match tokens.first() {
                Some(&first) if first == closer => break,
                Some(_) => on_line(self, &tokens)?,
                None => {}
            }
            self.cursor.advance();
        }

        self.open_blocks.pop();
        Ok(())
    }

    /// Skip an unrecognized line. If it opens a block, skip to its matching closer.
    fn skip_unknown(&mut self, tokens: &[&'a str]) -> ParseResult<()> {
        let Some(opener) = tokens.last().copied().filter(|t| is_opener(t)) else {
            log::trace!("Skipping line {}: {}", self.cursor.line_number(), tokens.join(" "));
            return Ok(());
        };

        log::debug!(
            "Skipping unknown block {} at line {}",
            tokens[0],
            self.cursor.line_number()
        );

        self.enter(tokens[0]);
        let mut expected: Vec<&str> = closer_for(opener).into_iter().collect();

        while !expected.is_empty() {
            self.cursor.advance();
            for token in self.current()? {
                if let Some(closer) = closer_for(token) {
                    expected.push(closer);
                } else if expected.last() == Some(&token) {
                    expected.pop();
                }
            }
        }

        self.open_blocks.pop();
        Ok(())
    }

    fn enter(&mut self, keyword: &'a str) {
        let line = self.cursor.line_number();
        log::log!(
            self.options.trace_level(),
            "{:indent$}{} (line {})",
            "",
            keyword,
            line,
            indent = self.open_blocks.len() * 2
        );
        self.open_blocks.push(Frame { keyword, line });
    }

    /// Tokens of the current line; running out of lines inside a block is an error.
    fn current(&self) -> ParseResult<Vec<&'a str>> {
        self.cursor.tokens().ok_or_else(|| ParseError::UnexpectedEndOfFile {
            line: self
                .open_blocks
                .last()
                .map_or(self.cursor.len(), |frame| frame.line),
            block_path: self.block_path(),
        })
    }

    fn block_path(&self) -> BlockPath {
        BlockPath(
            self.open_blocks
                .iter()
                .map(|frame| frame.keyword.to_string())
                .collect(),
        )
    }

    fn malformed(&self, keyword: &str, message: String) -> ParseError {
        ParseError::MalformedField {
            line: self.cursor.line_number(),
            keyword: keyword.to_string(),
            message,
            block_path: self.block_path(),
        }
    }

    /// Parse the float at `tokens[index]`, ignoring a trailing list comma.
    fn number(&self, keyword: &str, tokens: &[&str], index: usize) -> ParseResult<f32> {
        let token = tokens
            .get(index)
            .ok_or_else(|| self.malformed(keyword, format!("missing value {}", index + 1)))?;

        let value = strip_list_comma(token)
            .parse::<f32>()
            .map_err(|_| self.malformed(keyword, format!("expected a number, found `{}`", token)))?;

        if !value.is_finite() {
            return Err(self.malformed(keyword, format!("expected a finite number, found `{}`", token)));
        }
        Ok(value)
    }

    fn vec2(&self, keyword: &str, tokens: &[&str], start: usize) -> ParseResult<Vec2> {
        Ok(Vec2::new(
            self.number(keyword, tokens, start)?,
            self.number(keyword, tokens, start + 1)?,
        ))
    }

    fn vec3(&self, keyword: &str, tokens: &[&str], start: usize) -> ParseResult<Vec3> {
        Ok(Vec3::new(
            self.number(keyword, tokens, start)?,
            self.number(keyword, tokens, start + 1)?,
            self.number(keyword, tokens, start + 2)?,
        ))
    }
}

/// Name from a block header: the third token (`appearance DEF <name> Appearance {`).
fn header_name<'a>(header: &[&'a str]) -> Option<&'a str> {
    header.get(2).copied().filter(|token| !is_opener(token))
}

fn alpha_from_transparency(transparency: f32, line: usize) -> f32 {
    let alpha = 1.0 - transparency;
    if !(0.0..=1.0).contains(&alpha) {
        log::warn!(
            "Transparency {} at line {} is outside [0, 1], clamping",
            transparency,
            line
        );
    }
    alpha.clamp(0.0, 1.0)
}

/// Parse WRL content into a scene (without provenance).
pub fn parse_wrl(content: &str, options: &ParseOptions) -> ParseResult<Scene> {
    WrlParser::new(content, *options).parse()
}
