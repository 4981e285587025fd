//! Scoped grammar flags.
//!
//! The parser keeps one [`ParseContext`]: a stack of frames, each holding the
//! full flag set in force for the production being parsed. Pushing a frame
//! copies the parent's flags, so a production only states what it changes.
//! Popping normally discards the frame's changes. The exception is the pair
//! of cover-grammar bits, `ASSIGNMENT_TARGET` and `BINDING_ELEMENT`, which a
//! cover-grammar frame merges back into its parent on pop so that
//! "this expression can still be a pattern" survives nested sub-expressions.
//!
//! What leaks back is decided per frame by a set mask and a clear mask. The
//! documented rules are in [`PROPAGATION`].

bitflags::bitflags! {
    /// Grammar parameters and parser state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextFlags: u32 {
        const NONE                   = 0;
        /// The `in` operator may appear (false inside `for (init;` heads).
        const IN_ALLOWED             = 1 << 0;
        /// `yield` is a yield expression rather than an identifier.
        const YIELD_ALLOWED          = 1 << 1;
        /// `await` is an await expression rather than an identifier.
        const AWAIT_ALLOWED          = 1 << 2;
        const RETURN_ALLOWED         = 1 << 3;
        const BREAK_ALLOWED          = 1 << 4;
        const CONTINUE_ALLOWED       = 1 << 5;
        const STRICT                 = 1 << 6;
        /// Inside a `declare` context or ambient module.
        const AMBIENT                = 1 << 7;
        /// The expression parsed so far may be an assignment target.
        const ASSIGNMENT_TARGET      = 1 << 8;
        /// The expression parsed so far may be a binding element.
        const BINDING_ELEMENT        = 1 << 9;
        /// Still inside a directive prologue.
        const DIRECTIVE_POSITION     = 1 << 10;
        /// Parsing a parenthesized list that may turn out to be arrow
        /// parameters.
        const MAYBE_PARAMETERS       = 1 << 11;
        const IN_FUNCTION            = 1 << 12;
        const IN_GENERATOR           = 1 << 13;
        const IN_CLASS               = 1 << 14;
        /// A trailing `?` may be parsed as an optional tuple member.
        const TYPE_OPTIONAL_POSTFIX  = 1 << 15;
        /// A trailing `!` may be parsed as a non-null type (false in the
        /// type of an `as` cast, where it asserts the expression).
        const TYPE_NON_NULL_POSTFIX  = 1 << 16;
        /// Inside the `extends` operand of a conditional type.
        const DISALLOW_CONDITIONAL_TYPES = 1 << 17;
        /// Inside a speculative sub-parse.
        const SPECULATIVE            = 1 << 18;

        const COVER_GRAMMAR = Self::ASSIGNMENT_TARGET.bits() | Self::BINDING_ELEMENT.bits();
        /// Flags that a function boundary resets.
        const FUNCTION_BOUNDARY = Self::YIELD_ALLOWED.bits()
            | Self::AWAIT_ALLOWED.bits()
            | Self::RETURN_ALLOWED.bits()
            | Self::BREAK_ALLOWED.bits()
            | Self::CONTINUE_ALLOWED.bits()
            | Self::IN_GENERATOR.bits()
            | Self::DIRECTIVE_POSITION.bits()
            | Self::MAYBE_PARAMETERS.bits();
    }
}

/// One row of the propagation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    pub flag: ContextFlags,
    /// Setting the flag inside a frame also sets it in the parent.
    pub on_set: bool,
    /// Clearing the flag inside a frame also clears it in the parent.
    pub on_clear: bool,
    /// Which frames carry the propagation mask.
    pub frames: &'static str,
}

const fn scoped(flag: ContextFlags) -> Propagation {
    Propagation {
        flag,
        on_set: false,
        on_clear: false,
        frames: "none",
    }
}

/// How each flag behaves when a frame that changed it is popped.
pub const PROPAGATION: &[Propagation] = &[
    scoped(ContextFlags::IN_ALLOWED),
    scoped(ContextFlags::YIELD_ALLOWED),
    scoped(ContextFlags::AWAIT_ALLOWED),
    scoped(ContextFlags::RETURN_ALLOWED),
    scoped(ContextFlags::BREAK_ALLOWED),
    scoped(ContextFlags::CONTINUE_ALLOWED),
    scoped(ContextFlags::STRICT),
    scoped(ContextFlags::AMBIENT),
    Propagation {
        flag: ContextFlags::ASSIGNMENT_TARGET,
        on_set: false,
        on_clear: true,
        frames: "cover grammar",
    },
    Propagation {
        flag: ContextFlags::BINDING_ELEMENT,
        on_set: false,
        on_clear: true,
        frames: "cover grammar",
    },
    scoped(ContextFlags::DIRECTIVE_POSITION),
    scoped(ContextFlags::MAYBE_PARAMETERS),
    scoped(ContextFlags::IN_FUNCTION),
    scoped(ContextFlags::IN_GENERATOR),
    scoped(ContextFlags::IN_CLASS),
    scoped(ContextFlags::TYPE_OPTIONAL_POSTFIX),
    scoped(ContextFlags::TYPE_NON_NULL_POSTFIX),
    scoped(ContextFlags::DISALLOW_CONDITIONAL_TYPES),
    scoped(ContextFlags::SPECULATIVE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub flags: ContextFlags,
    /// Bits that are set in the parent on pop when set here.
    pub set_mask: ContextFlags,
    /// Bits that are cleared in the parent on pop when clear here.
    pub clear_mask: ContextFlags,
}

impl Frame {
    fn root(flags: ContextFlags) -> Self {
        Self {
            flags,
            set_mask: ContextFlags::NONE,
            clear_mask: ContextFlags::NONE,
        }
    }
}

/// Saved frame stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextCheckpoint(Vec<Frame>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    frames: Vec<Frame>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(ContextFlags::IN_ALLOWED | ContextFlags::COVER_GRAMMAR)
    }
}

impl ParseContext {
    pub fn new(flags: ContextFlags) -> Self {
        Self {
            frames: vec![Frame::root(flags)],
        }
    }

    #[inline]
    fn top(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    #[inline]
    pub fn flags(&self) -> ContextFlags {
        self.top().flags
    }

    #[inline]
    pub fn has(&self, flag: ContextFlags) -> bool {
        self.top().flags.contains(flag)
    }

    #[inline]
    pub fn set(&mut self, flag: ContextFlags, value: bool) {
        self.top_mut().flags.set(flag, value);
    }

    /// Number of pushed frames above the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Push a frame that inherits every flag of its parent.
    pub fn push(&mut self) {
        self.push_with(ContextFlags::NONE, ContextFlags::NONE);
    }

    /// Push a frame with `set` turned on and `clear` turned off.
    pub fn push_with(&mut self, set: ContextFlags, clear: ContextFlags) {
        let flags = (self.flags() | set) & !clear;
        self.frames.push(Frame::root(flags));
    }

    /// Pop a frame, merging back only what its masks allow.
    pub fn pop(&mut self) {
        self.pop_inherit(ContextFlags::NONE);
    }

    /// Pop a frame and additionally copy the `mask` bits, set or clear,
    /// into the parent.
    pub fn pop_inherit(&mut self, mask: ContextFlags) {
        if self.frames.len() < 2 {
            return;
        }
        let Some(child) = self.frames.pop() else { return };
        let parent = self.top_mut();
        parent.flags |= child.flags & child.set_mask;
        parent.flags &= !(child.clear_mask & !child.flags);
        parent.flags = (parent.flags & !mask) | (child.flags & mask);
    }

    /// Push a frame in which the cover-grammar bits start out true and do
    /// not leak back.
    pub fn isolate_cover_grammar(&mut self) {
        self.push_with(ContextFlags::COVER_GRAMMAR, ContextFlags::NONE);
    }

    /// Push a frame in which the cover-grammar bits start out true and are
    /// AND-ed back into the parent by [`ParseContext::inherit_cover_grammar`].
    pub fn push_cover_grammar(&mut self) {
        self.push_with(ContextFlags::COVER_GRAMMAR, ContextFlags::NONE);
        self.top_mut().clear_mask = ContextFlags::COVER_GRAMMAR;
    }

    pub fn inherit_cover_grammar(&mut self) {
        self.pop();
    }

    pub fn checkpoint(&self) -> ContextCheckpoint {
        ContextCheckpoint(self.frames.clone())
    }

    pub fn restore(&mut self, checkpoint: ContextCheckpoint) {
        self.frames = checkpoint.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_copies_parent_flags() {
        let mut ctx = ParseContext::new(ContextFlags::STRICT | ContextFlags::IN_ALLOWED);
        ctx.push_with(ContextFlags::RETURN_ALLOWED, ContextFlags::IN_ALLOWED);
        assert!(ctx.has(ContextFlags::STRICT));
        assert!(ctx.has(ContextFlags::RETURN_ALLOWED));
        assert!(!ctx.has(ContextFlags::IN_ALLOWED));
        assert_eq!(ctx.depth(), 1);

        ctx.pop();
        assert!(ctx.has(ContextFlags::IN_ALLOWED));
        assert!(!ctx.has(ContextFlags::RETURN_ALLOWED));
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn scoped_flags_do_not_leak() {
        let mut ctx = ParseContext::default();
        ctx.push();
        ctx.set(ContextFlags::YIELD_ALLOWED, true);
        ctx.set(ContextFlags::IN_ALLOWED, false);
        ctx.set(ContextFlags::ASSIGNMENT_TARGET, false);
        ctx.pop();
        assert!(!ctx.has(ContextFlags::YIELD_ALLOWED));
        assert!(ctx.has(ContextFlags::IN_ALLOWED));
        assert!(ctx.has(ContextFlags::ASSIGNMENT_TARGET));
    }

    #[test]
    fn cover_grammar_bits_and_into_parent() {
        let mut ctx = ParseContext::default();
        ctx.push_cover_grammar();
        ctx.set(ContextFlags::ASSIGNMENT_TARGET, false);
        ctx.inherit_cover_grammar();
        assert!(!ctx.has(ContextFlags::ASSIGNMENT_TARGET));
        assert!(ctx.has(ContextFlags::BINDING_ELEMENT));

        // A child that stays true never re-sets a cleared parent bit.
        ctx.push_cover_grammar();
        assert!(ctx.has(ContextFlags::ASSIGNMENT_TARGET));
        ctx.inherit_cover_grammar();
        assert!(!ctx.has(ContextFlags::ASSIGNMENT_TARGET));
    }

    #[test]
    fn isolated_cover_grammar_is_independent() {
        let mut ctx = ParseContext::default();
        ctx.set(ContextFlags::BINDING_ELEMENT, false);
        ctx.isolate_cover_grammar();
        assert!(ctx.has(ContextFlags::BINDING_ELEMENT));
        ctx.set(ContextFlags::ASSIGNMENT_TARGET, false);
        ctx.pop();
        assert!(ctx.has(ContextFlags::ASSIGNMENT_TARGET));
        assert!(!ctx.has(ContextFlags::BINDING_ELEMENT));
    }

    #[test]
    fn pop_inherit_copies_masked_bits_both_ways() {
        let mut ctx = ParseContext::new(ContextFlags::AMBIENT);
        ctx.push();
        ctx.set(ContextFlags::AMBIENT, false);
        ctx.set(ContextFlags::STRICT, true);
        ctx.pop_inherit(ContextFlags::AMBIENT | ContextFlags::STRICT);
        assert!(!ctx.has(ContextFlags::AMBIENT));
        assert!(ctx.has(ContextFlags::STRICT));
    }

    #[test]
    fn root_frame_survives_extra_pops() {
        let mut ctx = ParseContext::new(ContextFlags::STRICT);
        ctx.pop();
        ctx.pop();
        assert!(ctx.has(ContextFlags::STRICT));
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn checkpoint_restores_whole_stack() {
        let mut ctx = ParseContext::default();
        let saved = ctx.checkpoint();
        ctx.push_with(ContextFlags::SPECULATIVE, ContextFlags::NONE);
        ctx.push();
        ctx.restore(saved);
        assert_eq!(ctx.depth(), 0);
        assert!(!ctx.has(ContextFlags::SPECULATIVE));
    }

    #[test]
    fn propagation_table_is_exhaustive() {
        let listed = PROPAGATION.iter().fold(ContextFlags::NONE, |acc, row| acc | row.flag);
        assert_eq!(listed, ContextFlags::all());
        let leaking: Vec<_> = PROPAGATION.iter().filter(|row| row.on_set || row.on_clear).map(|row| row.flag).collect();
        assert_eq!(leaking, vec![ContextFlags::ASSIGNMENT_TARGET, ContextFlags::BINDING_ELEMENT]);
        assert!(PROPAGATION.iter().all(|row| !row.on_set));
    }
}
