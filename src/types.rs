
use failure::Fail;
use indexmap::IndexMap;

/// Ordered multimap of footer trailers.
///
/// Keys are stored lowercased (with `BREAKING CHANGE` canonicalized to
/// `breaking-change`); a key that appears on several footer lines keeps
/// one entry whose values are in input order.
pub type Footers = IndexMap<String, Vec<String>>;

/// The vocabulary accepted for the commit message type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dialect {
    /// `fix` and `feat` only.
    Minimal,
    /// The fixed eleven-keyword set: `build`, `chore`, `ci`, `docs`,
    /// `feat`, `fix`, `perf`, `refactor`, `revert`, `style`, `test`.
    Conventional,
    /// Any non-empty run of printable bytes up to `(`, `!`, or `:`.
    FreeForm,
}

impl Default for Dialect {
    fn default() -> Dialect { Dialect::Minimal }
}

// (Invariant: type and description are non-empty, the description has no
//  newline, the scope has no parentheses, footer keys are lowercase.)
#[derive(Debug, Clone, PartialEq)]
pub struct CommitMessage(pub(crate) RawCommitMessage);

impl CommitMessage {
    /// Convert into a form with public data members that you can freely
    /// match against and unpack.
    ///
    /// When you are done modifying the object, you may call `.validate()`
    /// to turn it back into a CommitMessage. (or you can keep all the data
    /// for yourself if you want!)
    pub fn into_raw(self) -> RawCommitMessage { self.0 }

    /// Borrowing form of `into_raw`.
    pub fn raw(&self) -> &RawCommitMessage { &self.0 }

    /// True iff the minimum viable prefix (type and description) is present.
    ///
    /// On a validated message this always holds; the predicate earns its
    /// keep on [`RawCommitMessage`], where best-effort parses live.
    pub fn minimal(&self) -> bool { self.0.minimal() }
}

/// Basic representation of a commit message with public data members.
///
/// The mapping between its fields and the parts of a Conventional Commits
/// message should be braindead obvious.
///
/// All members are public to allow you to construct it.
/// Be prepared for breakage as more fields are added;
/// you are advised to limit your usage of this type to small,
/// self-contained functions.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommitMessage {
    /// The commit type. (`fix` in `fix: typo`)
    pub kind: String,
    /// The parenthesized scope, without its parentheses.
    pub scope: Option<String>,
    /// Whether the breaking-change `!` marker preceded the colon.
    pub exclamation: bool,
    /// The single-line summary after the colon.
    pub description: String,
    /// Free-form text between the header and the footers.
    /// Empty when the message has no body.
    pub body: String,
    /// Footer trailers, keyed by lowercased token.
    pub footers: Footers,
}

/// Covers all the reasons why `RawCommitMessage::validate` might get mad
/// at you.
///
/// The variants are public so that by looking at the docs you can see all
/// the possible errors. You have no good reason to write code that matches
/// on this.
///
/// ...right?
#[derive(Debug, Fail)]
pub enum ValidationError {
    /// A commit message is nothing without its type.
    #[fail(display = "the commit message type may not be empty")]
    EmptyType,
    /// Nor without its description.
    #[fail(display = "the description may not be empty")]
    EmptyDescription,
    /// The description is a single line by definition.
    #[fail(display = "the description may not contain a newline")]
    NewlineInDescription,
    /// A scope, when present, has at least one character.
    #[fail(display = "the scope may not be empty")]
    EmptyScope,
    /// Parentheses delimit the scope and thus cannot appear inside it.
    #[fail(display = "the scope may not contain parentheses")]
    ParenInScope,
    /// Footer keys are stored as lowercase alnum-dash tokens.
    #[fail(display = "footer key {:?} is not a lowercase token", _0)]
    BadFooterKey(String),
    /// Every footer line carries a non-empty value.
    #[fail(display = "footer {:?} has an empty value", _0)]
    EmptyFooterValue(String),

    #[doc(hidden)]
    #[fail(display = "this variant only exists so you can't exhaustively match (sorry)")]
    AndManyMooooooooore,
}

fn _check_conv() {
    fn panic<T>() -> T { panic!() }
    let e: ValidationError = panic();
    let _: failure::Error = e.into();
}

impl RawCommitMessage {
    /// Convert into a `CommitMessage` object after checking its invariants.
    ///
    /// To see what those invariants are, check the docs for ValidationError.
    pub fn validate(self) -> Result<CommitMessage, ValidationError> {
        g_ensure!(!self.kind.is_empty(), ValidationError::EmptyType);
        g_ensure!(!self.description.is_empty(), ValidationError::EmptyDescription);
        g_ensure!(!self.description.contains('\n'), ValidationError::NewlineInDescription);

        if let Some(ref scope) = self.scope {
            g_ensure!(!scope.is_empty(), ValidationError::EmptyScope);
            g_ensure!(
                !scope.contains('(') && !scope.contains(')'),
                ValidationError::ParenInScope,
            );
        }

        for (key, values) in &self.footers {
            let lower_token = !key.is_empty() && key.bytes().all(|b| {
                b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
            });
            g_ensure!(lower_token, ValidationError::BadFooterKey(key.clone()));

            for value in values {
                g_ensure!(!value.is_empty(), ValidationError::EmptyFooterValue(key.clone()));
            }
        }

        Ok(CommitMessage(self))
    }

    /// True iff the minimum viable prefix (type and description) is present.
    ///
    /// This is the bar a failed parse must clear for best-effort mode to
    /// hand back a partial message.
    pub fn minimal(&self) -> bool
    { !self.kind.is_empty() && !self.description.is_empty() }
}
