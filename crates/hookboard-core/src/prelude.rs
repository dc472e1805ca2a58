pub use crate::clock::{Clock, FixedClock, SystemClock, VirtualClock, format_date_time, format_time};
pub use crate::effects::{Dispose, Effect, on_unmount};
pub use crate::error::{ContextError, StorageError};
pub use crate::locals::{provide_context, try_use_context, use_context};
pub use crate::random::{RandomSource, SequenceRandom, SystemRandom};
pub use crate::reactive::{batch, untrack};
pub use crate::runtime::{Component, Mounted, Runtime, RuntimeBuilder};
pub use crate::scope::Scope;
pub use crate::signal::{Signal, signal};
pub use crate::state::Memo;
pub use crate::storage::{
    FileStorage, MemoryStorage, Storage, StoredSignal, ValueStore, use_local_storage,
};
pub use crate::timer::{TimerId, Timers};
pub use crate::view::{
    Button, ButtonVariant, Checkbox, Column, Heading, ProgressBar, Row, SectionView, Text,
    TextField, View, ViewKind,
};
