/// Compressed radix trie answering longest-prefix queries.
///
/// Edge labels are byte strings so splits never have to respect UTF-8
/// boundaries. Children of a node always start with distinct bytes.
#[derive(Debug)]
pub(crate) struct PrefixTrie<V> {
    root: Node<V>,
}

#[derive(Debug)]
struct Node<V> {
    value: Option<V>,
    children: Vec<Edge<V>>,
}

#[derive(Debug)]
struct Edge<V> {
    label: Vec<u8>,
    node: Node<V>,
}

impl<V> Default for PrefixTrie<V> {
    fn default() -> Self {
        PrefixTrie { root: Node::new() }
    }
}

impl<V> Node<V> {
    fn new() -> Self {
        Node {
            value: None,
            children: Vec::new(),
        }
    }
}

impl<V> PrefixTrie<V> {
    /// Inserts `value` under `prefix`, replacing any previous value.
    pub(crate) fn insert(&mut self, prefix: &str, value: V) {
        let mut node = &mut self.root;
        let mut rest = prefix.as_bytes();
        loop {
            let Some(&first) = rest.first() else {
                node.value = Some(value);
                return;
            };
            let Some(index) = node.children.iter().position(|edge| edge.label[0] == first) else {
                node.children.push(Edge {
                    label: rest.to_vec(),
                    node: Node {
                        value: Some(value),
                        children: Vec::new(),
                    },
                });
                return;
            };

            let edge = &mut node.children[index];
            let common = common_prefix_len(&edge.label, rest);
            if common < edge.label.len() {
                let suffix = edge.label.split_off(common);
                let split = std::mem::replace(&mut edge.node, Node::new());
                edge.node.children.push(Edge {
                    label: suffix,
                    node: split,
                });
            }
            rest = &rest[common..];
            node = &mut node.children[index].node;
        }
    }

    /// Value stored under the longest prefix of `key`.
    pub(crate) fn longest_match(&self, key: &str) -> Option<&V> {
        let mut node = &self.root;
        let mut rest = key.as_bytes();
        let mut best = node.value.as_ref();
        while let Some(edge) = node
            .children
            .iter()
            .find(|edge| rest.starts_with(&edge.label))
        {
            rest = &rest[edge.label.len()..];
            node = &edge.node;
            if node.value.is_some() {
                best = node.value.as_ref();
            }
        }
        best
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
