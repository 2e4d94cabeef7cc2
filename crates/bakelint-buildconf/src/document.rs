//! Block tree for buildconf documents.
//!
//! Blocks nest by a stack: an opener pushes, `..` pops and attaches the block to its parent.
//! Directives belong to the innermost open block. Unclosed blocks are closed at end of input,
//! and stray `..` lines are ignored here (the balance check reports them).

use crate::lexer::{Arg, Line, LineKind, lex, tokenize_args};

/// A `.name args…` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Directive name, without the leading dot.
    pub name: &'a str,
    /// Tokenized arguments.
    pub args: Vec<Arg<'a>>,
    /// Raw argument text.
    pub rest: &'a str,
    /// 1-based line.
    pub line: usize,
}

impl<'a> Directive<'a> {
    /// Text of the `n`th argument.
    pub fn arg(&self, n: usize) -> Option<&'a str> {
        self.args.get(n).map(|a| a.text)
    }

    /// Whether `.name key …` is a `key` form (`.set name "x"`, `.takes id as flag`).
    pub fn keyword_at(&self, n: usize, keyword: &str) -> bool {
        self.args
            .get(n)
            .is_some_and(|a| !a.quoted && a.text == keyword)
    }
}

/// A `[tag name] … ..` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Tag (`bake`, `tool`, …).
    pub tag: &'a str,
    /// Block name, when it is a plain identifier.
    pub name: Option<&'a str>,
    /// 1-based line of the opener.
    pub line: usize,
    /// Tag of the enclosing block.
    pub parent_tag: Option<&'a str>,
    /// Directives directly inside this block.
    pub directives: Vec<Directive<'a>>,
    /// Nested blocks, in source order.
    pub children: Vec<Block<'a>>,
}

impl<'a> Block<'a> {
    fn open(tag: &'a str, name: Option<&'a str>, line: usize, parent_tag: Option<&'a str>) -> Self {
        Self {
            tag,
            name,
            line,
            parent_tag,
            directives: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Own directives named `name`.
    pub fn directives_named<'s>(
        &'s self,
        name: &'s str,
    ) -> impl Iterator<Item = &'s Directive<'a>> + 's {
        self.directives.iter().filter(move |d| d.name == name)
    }

    /// Whether the block has at least one own directive named `name`.
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name == name)
    }

    fn visit<'s>(&'s self, out: &mut Vec<&'s Block<'a>>) {
        out.push(self);
        for child in &self.children {
            child.visit(out);
        }
    }
}

/// A lexed and nested buildconf document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    /// Every line of the source.
    pub lines: Vec<Line<'a>>,
    /// Top-level blocks.
    pub blocks: Vec<Block<'a>>,
    /// Directives outside any block.
    pub loose_directives: Vec<Directive<'a>>,
}

impl<'a> Document<'a> {
    /// Lex and nest `source`.
    pub fn parse(source: &'a str) -> Self {
        let lines = lex(source);
        let mut stack: Vec<Block<'a>> = Vec::new();
        let mut blocks = Vec::new();
        let mut loose_directives = Vec::new();

        fn attach<'a>(stack: &mut [Block<'a>], top: &mut Vec<Block<'a>>, block: Block<'a>) {
            match stack.last_mut() {
                Some(parent) => parent.children.push(block),
                None => top.push(block),
            }
        }

        for line in &lines {
            match line.kind {
                LineKind::Open { tag, name } => {
                    let parent_tag = stack.last().map(|b| b.tag);
                    stack.push(Block::open(tag, name, line.number, parent_tag));
                }
                LineKind::Close => {
                    if let Some(block) = stack.pop() {
                        attach(&mut stack, &mut blocks, block);
                    }
                }
                LineKind::Directive { name, rest } => {
                    let directive = Directive {
                        name,
                        args: tokenize_args(rest),
                        rest,
                        line: line.number,
                    };
                    match stack.last_mut() {
                        Some(block) => block.directives.push(directive),
                        None => loose_directives.push(directive),
                    }
                }
                LineKind::Blank | LineKind::Comment | LineKind::Header { .. } | LineKind::Text => {}
            }
        }

        while let Some(block) = stack.pop() {
            attach(&mut stack, &mut blocks, block);
        }

        Self {
            lines,
            blocks,
            loose_directives,
        }
    }

    /// Every block at any depth, ordered by opener line.
    pub fn all_blocks(&self) -> Vec<&Block<'a>> {
        let mut out = Vec::new();
        for block in &self.blocks {
            block.visit(&mut out);
        }
        out.sort_by_key(|b| b.line);
        out
    }

    /// Every block tagged `tag`, ordered by opener line.
    pub fn blocks_tagged(&self, tag: &str) -> Vec<&Block<'a>> {
        self.all_blocks()
            .into_iter()
            .filter(|b| b.tag == tag)
            .collect()
    }

    /// Every directive named `name`, inside blocks or not, ordered by line.
    pub fn directives_named(&self, name: &str) -> Vec<&Directive<'a>> {
        let mut out: Vec<&Directive<'a>> = self
            .loose_directives
            .iter()
            .chain(
                self.all_blocks()
                    .into_iter()
                    .flat_map(|b| b.directives.iter()),
            )
            .filter(|d| d.name == name)
            .collect();
        out.sort_by_key(|d| d.line);
        out
    }

    /// Meaningful lines (neither blank nor comments).
    pub fn meaningful_lines(&self) -> impl Iterator<Item = &Line<'a>> {
        self.lines.iter().filter(|l| l.is_meaningful())
    }
}
