//! Built-in sample text for trying the tool without typing.

pub const SAMPLE_TEXT: &str = "Natural Language Processing (NLP) is a subfield of linguistics, computer science, and artificial intelligence concerned with the interactions between computers and human language, in particular how to program computers to process and analyze large amounts of natural language data.

The challenges in NLP involve speech recognition, natural language understanding, and natural language generation. Many different classes of machine learning algorithms have been applied to natural language processing tasks. These algorithms take as input a large set of features that are generated from the input data.

Modern NLP algorithms are based on machine learning, especially statistical machine learning. The machine learning paradigm calls instead for using statistical inference to automatically learn such rules through the analysis of large corpora of typical real-world examples.

Many different classes of machine learning algorithms have been applied to natural language processing tasks. These algorithms take as input a large set of features that are generated from the input data. Some of the earliest-used algorithms, such as decision trees, produced systems of hard if-then rules similar to existing hand-written rules. Increasingly, however, research has focused on statistical models, which make soft, probabilistic decisions based on attaching real-valued weights to each input feature. Such models have the advantage that they can express the relative certainty of many different possible answers rather than only one, producing more reliable results when such a model is included as a component of a larger system.";
