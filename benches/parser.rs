use std::rc::Rc;

use basalt::{parse_module, parse_script, Source};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FIXTURE: &str = r#"
'use strict';

class EventEmitter {
    #listeners = new Map();

    on(name, handler) {
        let handlers = this.#listeners.get(name);
        if (handlers === undefined) {
            handlers = [];
            this.#listeners.set(name, handlers);
        }
        handlers.push(handler);
        return this;
    }

    emit(name, ...args) {
        const handlers = this.#listeners.get(name) ?? [];
        for (const handler of handlers) {
            handler(...args);
        }
        return handlers.length > 0;
    }
}

function quicksort(items, lo = 0, hi = items.length - 1) {
    if (lo >= hi) return;
    const pivot = items[(lo + hi) >> 1];
    let [i, j] = [lo, hi];
    while (i <= j) {
        while (items[i] < pivot) i++;
        while (items[j] > pivot) j--;
        if (i <= j) {
            [items[i], items[j]] = [items[j], items[i]];
            i++, j--;
        }
    }
    quicksort(items, lo, j);
    quicksort(items, i, hi);
}

const formatted = `sorted: ${[3, 1, 2].map(x => x ** 2).join(', ')}`;
const matcher = /([a-z]+)-(\d+)/gi;

async function* paginate(fetchPage) {
    let page = 0;
    while (true) {
        const { items, done } = await fetchPage(page++);
        yield* items;
        if (done) break;
    }
}
"#;

const MODULE_FIXTURE: &str = r#"
import { readFile } from "fs";
import * as path from "path";

export const cache = new Map();

export async function load(name) {
    const key = path.resolve(name);
    let entry = cache.get(key);
    if (entry === undefined) {
        entry = await readFile(key, "utf8");
        cache.set(key, entry);
    }
    return entry;
}

export default load;
"#;

fn bench_parse_script(c: &mut Criterion) {
    c.bench_function("parse_script", |b| {
        b.iter(|| {
            let source = Rc::new(Source::new_from_string("bench.js", FIXTURE.to_owned()));
            black_box(parse_script(&source).unwrap());
        })
    });
}

fn bench_parse_module(c: &mut Criterion) {
    c.bench_function("parse_module", |b| {
        b.iter(|| {
            let source = Rc::new(Source::new_from_string("bench.mjs", MODULE_FIXTURE.to_owned()));
            black_box(parse_module(&source).unwrap());
        })
    });
}

criterion_group!(benches, bench_parse_script, bench_parse_module);
criterion_main!(benches);
