//! Reply tree reconstruction.
//!
//! Comment pages do not link replies to their parents. Instead a thread is a
//! flat list in which a comment may be followed by an unclassed wrapper
//! holding the replies to it, which may in turn contain comments and
//! wrappers. [`build`] turns that encoding back into a tree, using an explicit
//! stack of frames so arbitrarily deep threads cannot overflow.

use std::vec::IntoIter;

/// A node of the flat encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadNode<T> {
    Comment(T),
    Replies(Vec<ThreadNode<T>>),
}

/// Something that can take part in a reply tree.
pub trait Reply: Sized {
    type Id: Clone;
    /// Identity other replies refer to.
    fn id(&self) -> Self::Id;
    fn set_replying_to(&mut self, id: Option<Self::Id>);
    fn replies_mut(&mut self) -> &mut Vec<Self>;
}

/// How a reconstructed sub-thread attaches to its surroundings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThreadShape {
    /// Every sub-thread becomes the children of the comment before it.
    #[default]
    Nested,
    /// Only the first reply level nests; deeper sub-threads are spliced in
    /// beside the replies they answer, each keeping its `replying_to`. This
    /// is how the archive itself lays threads out on narrow screens.
    Flattened,
}

struct Frame<T: Reply> {
    nodes: IntoIter<ThreadNode<T>>,
    replying_to: Option<T::Id>,
    out: Vec<T>,
}
impl<T: Reply> Frame<T> {
    fn new(nodes: Vec<ThreadNode<T>>, replying_to: Option<T::Id>) -> Self {
        Self {
            nodes: nodes.into_iter(),
            replying_to,
            out: Vec::new(),
        }
    }

    /// Attaches a finished sub-thread: under this level's last comment, or
    /// spliced into this level when flattening below the top.
    fn attach(&mut self, replies: Vec<T>, shape: ThreadShape) {
        if replies.is_empty() {
            return;
        }
        let nest = shape == ThreadShape::Nested || self.replying_to.is_none();
        match self.out.last_mut() {
            Some(parent) if nest => parent.replies_mut().extend(replies),
            _ => self.out.extend(replies),
        }
    }
}

/// Rebuilds the reply tree of a flat thread.
///
/// A wrapper replies to the closest comment before it at its own level. A
/// wrapper with no comment before it (first in its level, or following only
/// other wrappers) inherits the level's own `replying_to` and, having no
/// comment to nest under, is spliced into the level.
pub fn build<T: Reply>(nodes: Vec<ThreadNode<T>>, shape: ThreadShape) -> Vec<T> {
    let mut stack = vec![Frame::new(nodes, None)];
    loop {
        let Some(frame) = stack.last_mut() else {
            return Vec::new();
        };
        match frame.nodes.next() {
            Some(ThreadNode::Comment(mut comment)) => {
                comment.set_replying_to(frame.replying_to.clone());
                frame.out.push(comment);
            },
            Some(ThreadNode::Replies(nodes)) => {
                let replying_to = frame.out.last().map(T::id).or_else(|| frame.replying_to.clone());
                stack.push(Frame::new(nodes, replying_to));
            },
            None => {
                let Some(finished) = stack.pop() else {
                    return Vec::new();
                };
                match stack.last_mut() {
                    Some(parent) => parent.attach(finished.out, shape),
                    None => return finished.out,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        name: &'static str,
        replying_to: Option<&'static str>,
        children: Vec<Note>,
    }
    impl Reply for Note {
        type Id = &'static str;
        fn id(&self) -> &'static str {
            self.name
        }
        fn set_replying_to(&mut self, id: Option<&'static str>) {
            self.replying_to = id;
        }
        fn replies_mut(&mut self) -> &mut Vec<Self> {
            &mut self.children
        }
    }

    fn c(name: &'static str) -> ThreadNode<Note> {
        ThreadNode::Comment(Note {
            name,
            replying_to: None,
            children: vec![],
        })
    }

    fn wrap(nodes: Vec<ThreadNode<Note>>) -> ThreadNode<Note> {
        ThreadNode::Replies(nodes)
    }

    /// Renders a forest as `name(children)` so expectations stay readable.
    fn render(notes: &[Note]) -> String {
        notes
            .iter()
            .map(|n| {
                if n.children.is_empty() {
                    n.name.to_string()
                } else {
                    format!("{}({})", n.name, render(&n.children))
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    #[rstest]
    #[case::two_levels(vec![c("C1"), wrap(vec![c("C2")]), c("C3")], "C1(C2),C3", "C1(C2),C3")]
    #[case::three_levels(vec![c("C1"), wrap(vec![c("C2"), wrap(vec![c("C3")])])], "C1(C2(C3))", "C1(C2,C3)")]
    #[case::four_levels(
        vec![c("C1"), wrap(vec![c("C2"), wrap(vec![c("C3"), wrap(vec![c("C4")])])])],
        "C1(C2(C3(C4)))",
        "C1(C2,C3,C4)"
    )]
    #[case::siblings(vec![c("A"), wrap(vec![c("B"), c("C")]), c("D"), wrap(vec![c("E")])], "A(B,C),D(E)", "A(B,C),D(E)")]
    #[case::flat(vec![c("A"), c("B")], "A,B", "A,B")]
    #[case::empty_wrapper(vec![c("A"), wrap(vec![]), c("B")], "A,B", "A,B")]
    fn test_thread_shapes(#[case] nodes: Vec<ThreadNode<Note>>, #[case] nested: &str, #[case] flattened: &str) {
        assert_eq!(render(&build(nodes.clone(), ThreadShape::Nested)), nested);
        assert_eq!(render(&build(nodes, ThreadShape::Flattened)), flattened);
    }

    #[test]
    fn replies_record_who_they_answer() {
        let nodes = vec![c("C1"), wrap(vec![c("C2"), wrap(vec![c("C3")])]), c("C4")];
        let tree = build(nodes.clone(), ThreadShape::Nested);
        assert_eq!(tree[0].replying_to, None);
        assert_eq!(tree[0].children[0].replying_to, Some("C1"));
        assert_eq!(tree[0].children[0].children[0].replying_to, Some("C2"));
        assert_eq!(tree[1].replying_to, None);

        let flat = build(nodes, ThreadShape::Flattened);
        let replies: Vec<_> = flat[0].children.iter().map(|n| (n.name, n.replying_to)).collect();
        assert_eq!(replies, [("C2", Some("C1")), ("C3", Some("C2"))]);
    }

    #[test]
    fn wrapper_after_wrapper_answers_the_last_comment() {
        let nodes = vec![c("A"), wrap(vec![c("B")]), wrap(vec![c("C")])];
        let tree = build(nodes, ThreadShape::Nested);
        assert_eq!(render(&tree), "A(B,C)");
        assert_eq!(tree[0].children[1].replying_to, Some("A"));
    }

    #[test]
    fn leading_wrapper_is_spliced() {
        let nodes = vec![wrap(vec![c("Orphan")]), c("A")];
        let tree = build(nodes, ThreadShape::Nested);
        assert_eq!(render(&tree), "Orphan,A");
        assert_eq!(tree[0].replying_to, None);
    }
}
